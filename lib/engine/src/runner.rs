//! Config runner
//!
//! Evaluates every query of a plan at one window granularity: window the
//! document, embed the windows once, then retrieve and align per query.

use ahash::AHashMap;
use docverify_core::{window, Embedder, Error, Result, SimilarityIndex, Window, WindowConfig};
use docverify_similarity::{align_with, QueryPlan};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::options::VerifierOptions;

/// Score of a query that produced no alignment
pub const UNSCORED: f32 = -1.0;

/// Best evidence for one query at one config
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateResult {
    /// Best-aligned sub-phrase, as written in the document
    pub matched: Option<String>,
    /// Alignment score in [0.0, 100.0], or [`UNSCORED`]
    pub score: f32,
    /// L2 distance of the source window to the query
    pub distance: Option<f32>,
    /// Full text of the window the match came from
    pub window: Option<String>,
}

impl CandidateResult {
    pub fn unscored() -> Self {
        Self {
            matched: None,
            score: UNSCORED,
            distance: None,
            window: None,
        }
    }

    #[inline]
    pub fn is_scored(&self) -> bool {
        self.score >= 0.0
    }
}

/// Per-query results of one config, keyed by query label
pub type ConfigResults = AHashMap<String, CandidateResult>;

/// Run one window config over the whole plan
pub fn run_config(
    config: WindowConfig,
    text: &str,
    embedder: &dyn Embedder,
    plan: &QueryPlan,
    options: &VerifierOptions,
) -> Result<ConfigResults> {
    let started = Instant::now();
    let windows = window(text, config)?;
    let mut results = ConfigResults::with_capacity(plan.len());
    if plan.is_empty() {
        return Ok(results);
    }

    let window_count = windows.len();
    let index = SimilarityIndex::build(windows, embedder)?;
    check_deadline(config, started, options.deadline)?;
    debug!(config = %config, windows = window_count, "index ready");

    for query in plan.queries() {
        check_deadline(config, started, options.deadline)?;
        let candidates = index.search(&query.text, embedder, options.top_k)?;
        let best = best_candidate(&query.text, &candidates, options);
        debug!(
            config = %config,
            label = %query.label,
            candidates = candidates.len(),
            score = best.score,
            "query aligned"
        );
        results.insert(query.label.clone(), best);
    }

    Ok(results)
}

/// Align `query` against retrieved windows, keeping the highest score
///
/// Candidates arrive nearest first, so on equal scores the window with the
/// lower vector distance wins. Alignments below `options.min_score` are
/// dropped; if none remain the result is unscored.
pub fn best_candidate(
    query: &str,
    candidates: &[(&Window, f32)],
    options: &VerifierOptions,
) -> CandidateResult {
    let mut best = CandidateResult::unscored();
    for (window, distance) in candidates {
        let Some(alignment) = align_with(query, &window.text, options.case_sensitive) else {
            continue;
        };
        if alignment.score < options.min_score {
            continue;
        }
        if alignment.score > best.score {
            best = CandidateResult {
                matched: Some(alignment.matched),
                score: alignment.score,
                distance: Some(*distance),
                window: Some(window.text.clone()),
            };
        }
    }
    best
}

fn check_deadline(config: WindowConfig, started: Instant, deadline: Option<Duration>) -> Result<()> {
    match deadline {
        Some(limit) if started.elapsed() > limit => Err(Error::Timeout {
            config,
            elapsed_ms: started.elapsed().as_millis(),
        }),
        _ => Ok(()),
    }
}
