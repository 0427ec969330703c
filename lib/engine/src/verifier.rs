//! The verification entry point
//!
//! `record + text -> report`. The embedder is supplied by the caller, built
//! once, and shared read-only by every config task of every run.

use docverify_core::{Embedder, Error, Result};
use docverify_similarity::{build_queries, GroundTruthRecord};
use std::sync::Arc;
use tracing::{debug, info};

use crate::options::VerifierOptions;
use crate::orchestrator::run_all;
use crate::reconcile::reconcile;
use crate::report::VerificationReport;

/// Reusable verifier holding an embedder and run options
#[derive(Clone)]
pub struct Verifier {
    embedder: Arc<dyn Embedder>,
    options: VerifierOptions,
}

impl Verifier {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_options(embedder, VerifierOptions::default())
    }

    pub fn with_options(embedder: Arc<dyn Embedder>, options: VerifierOptions) -> Self {
        Self { embedder, options }
    }

    pub fn options(&self) -> &VerifierOptions {
        &self.options
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Verify `record` against `text`
    ///
    /// Empty text, missing fields and failing configs all still produce a
    /// report. Only a run in which no config succeeded is an error.
    pub fn verify(&self, record: &GroundTruthRecord, text: &str) -> Result<VerificationReport> {
        verify_with(record, text, self.embedder.as_ref(), &self.options)
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("embedding_dim", &self.embedder.dim())
            .field("options", &self.options)
            .finish()
    }
}

/// Verify with default options
pub fn verify(
    record: &GroundTruthRecord,
    text: &str,
    embedder: &dyn Embedder,
) -> Result<VerificationReport> {
    verify_with(record, text, embedder, &VerifierOptions::default())
}

/// Verify with explicit options
pub fn verify_with(
    record: &GroundTruthRecord,
    text: &str,
    embedder: &dyn Embedder,
    options: &VerifierOptions,
) -> Result<VerificationReport> {
    let plan = build_queries(record);
    if plan.is_empty() {
        debug!("record has no usable fields, every group will be a no-match");
    }
    if text.trim().is_empty() {
        debug!("document text is empty, every group will be a no-match");
    }

    let outcomes = run_all(&options.configs, text, embedder, &plan, options);
    if !outcomes.iter().any(|o| o.is_ok()) {
        return Err(Error::AllConfigsFailed {
            attempted: outcomes.len(),
        });
    }

    let verdicts = reconcile(&plan, &outcomes);
    let report = VerificationReport::new(&verdicts, &outcomes, options.acceptance_threshold);

    info!(
        queries = plan.len(),
        configs_ok = report.configs_evaluated.len(),
        configs_failed = report.configs_failed.len(),
        all_matched = report.all_matched(),
        "verification finished"
    );
    Ok(report)
}
