//! Verification report
//!
//! The serializable output of a run: per group the expected value, the best
//! evidence found, its confidence, and the config and query that produced it.

use docverify_similarity::FieldGroup;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::orchestrator::ConfigOutcome;
use crate::reconcile::GroupVerdict;
use crate::runner::UNSCORED;

/// How a group's verdict compares to the acceptance threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    LowConfidence,
    NoMatch,
}

/// Report entry for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub expected: Option<String>,
    pub matched: Option<String>,
    /// Alignment score in [0.0, 100.0], -1 for no match
    pub confidence: f32,
    pub status: MatchStatus,
    /// Winning config as `size:overlap`
    pub config: Option<String>,
    pub label: Option<String>,
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
}

impl FieldReport {
    fn from_verdict(verdict: &GroupVerdict, threshold: f32) -> Self {
        match &verdict.winner {
            Some(winner) => {
                let status = if winner.result.score >= threshold {
                    MatchStatus::Matched
                } else {
                    MatchStatus::LowConfidence
                };
                Self {
                    expected: verdict.expected.clone(),
                    matched: winner.result.matched.clone(),
                    confidence: winner.result.score,
                    status,
                    config: Some(winner.config.to_string()),
                    label: Some(winner.label.clone()),
                    query: Some(winner.query.clone()),
                    distance: winner.result.distance,
                    window: winner.result.window.clone(),
                }
            }
            None => Self {
                expected: verdict.expected.clone(),
                matched: None,
                confidence: UNSCORED,
                status: MatchStatus::NoMatch,
                config: None,
                label: None,
                query: None,
                distance: None,
                window: None,
            },
        }
    }
}

/// A config that was dropped from reconciliation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigFailure {
    pub config: String,
    pub error: String,
}

/// Full result of one verification run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    pub fields: BTreeMap<FieldGroup, FieldReport>,
    pub configs_evaluated: Vec<String>,
    pub configs_failed: Vec<ConfigFailure>,
}

impl VerificationReport {
    pub fn new(verdicts: &[GroupVerdict], outcomes: &[ConfigOutcome], threshold: f32) -> Self {
        let fields = verdicts
            .iter()
            .map(|v| (v.group, FieldReport::from_verdict(v, threshold)))
            .collect();

        let mut configs_evaluated = Vec::new();
        let mut configs_failed = Vec::new();
        for outcome in outcomes {
            match &outcome.result {
                Ok(_) => configs_evaluated.push(outcome.config.to_string()),
                Err(e) => configs_failed.push(ConfigFailure {
                    config: outcome.config.to_string(),
                    error: e.to_string(),
                }),
            }
        }

        Self {
            fields,
            configs_evaluated,
            configs_failed,
        }
    }

    pub fn field(&self, group: FieldGroup) -> Option<&FieldReport> {
        self.fields.get(&group)
    }

    /// True when at least one group had an expected value and every such
    /// group was matched
    pub fn all_matched(&self) -> bool {
        let mut expected = self.fields.values().filter(|f| f.expected.is_some()).peekable();
        expected.peek().is_some() && expected.all(|f| f.status == MatchStatus::Matched)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
