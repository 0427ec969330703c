use docverify_core::{WindowConfig, DEFAULT_TOP_K};
use std::time::Duration;

/// Confidence at or above which a verdict counts as a match
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f32 = 80.0;

/// Alignments scoring below this are not evidence of the value at all
pub const DEFAULT_MIN_SCORE: f32 = 50.0;

/// Configuration for a verification run
#[derive(Debug, Clone)]
pub struct VerifierOptions {
    /// Window granularities, evaluated concurrently and reconciled in this order
    pub configs: Vec<WindowConfig>,
    /// Candidate windows retrieved per query and config
    pub top_k: usize,
    /// Minimum alignment score reported as `matched`
    pub acceptance_threshold: f32,
    /// Alignments below this score are discarded, so a value missing from
    /// the document is a no-match rather than a low-confidence guess
    pub min_score: f32,
    /// Compare letter case when scoring (`ØRNEVEJ` vs `Ørnevej`)
    pub case_sensitive: bool,
    /// Per-config time budget; a config that exceeds it is dropped
    pub deadline: Option<Duration>,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            configs: WindowConfig::defaults(),
            top_k: DEFAULT_TOP_K,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            min_score: DEFAULT_MIN_SCORE,
            case_sensitive: false,
            deadline: None,
        }
    }
}

impl VerifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configs(mut self, configs: Vec<WindowConfig>) -> Self {
        self.configs = configs;
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn acceptance_threshold(mut self, threshold: f32) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    pub fn min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}
