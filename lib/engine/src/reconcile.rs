//! Group reconciliation
//!
//! Picks one verdict per [`FieldGroup`] from every successful config and
//! every query variant of the group. Configs are scanned in the order they
//! were supplied and labels in plan order; a candidate only replaces the
//! current best on a strictly greater score, so the first maximum wins.

use docverify_core::WindowConfig;
use docverify_similarity::{FieldGroup, QueryPlan};
use serde::Serialize;

use crate::orchestrator::ConfigOutcome;
use crate::runner::{CandidateResult, UNSCORED};

/// The candidate that won a group, with where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Winner {
    pub config: WindowConfig,
    pub label: String,
    pub query: String,
    pub result: CandidateResult,
}

/// Reconciled answer for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupVerdict {
    pub group: FieldGroup,
    pub expected: Option<String>,
    /// `None` is an explicit no-match
    pub winner: Option<Winner>,
}

impl GroupVerdict {
    pub fn score(&self) -> f32 {
        self.winner.as_ref().map_or(UNSCORED, |w| w.result.score)
    }

    pub fn is_no_match(&self) -> bool {
        self.winner.is_none()
    }
}

/// One verdict for every group, in [`FieldGroup::ALL`] order
///
/// Failed configs are skipped. Groups without queries or without any scored
/// candidate get a no-match verdict.
pub fn reconcile(plan: &QueryPlan, outcomes: &[ConfigOutcome]) -> Vec<GroupVerdict> {
    FieldGroup::ALL
        .iter()
        .map(|&group| GroupVerdict {
            group,
            expected: plan.expected(group).map(str::to_string),
            winner: best_for_group(group, plan, outcomes),
        })
        .collect()
}

fn best_for_group(group: FieldGroup, plan: &QueryPlan, outcomes: &[ConfigOutcome]) -> Option<Winner> {
    let mut best: Option<Winner> = None;

    for outcome in outcomes {
        let Some(results) = outcome.results() else {
            continue;
        };
        for query in plan.group_queries(group) {
            let Some(candidate) = results.get(&query.label) else {
                continue;
            };
            if !candidate.is_scored() {
                continue;
            }
            let better = best
                .as_ref()
                .map_or(true, |current| candidate.score > current.result.score);
            if better {
                best = Some(Winner {
                    config: outcome.config,
                    label: query.label.clone(),
                    query: query.text.clone(),
                    result: candidate.clone(),
                });
            }
        }
    }

    best
}
