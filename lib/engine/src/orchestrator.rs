//! Multi-config orchestration
//!
//! Fork-join over window configs on a dedicated thread pool with one worker
//! per config. Each task owns its windows and index and returns its own
//! [`ConfigOutcome`]; outcomes are collected in config order, so nothing
//! downstream depends on which task finished first.

use docverify_core::{Embedder, Error, Result, WindowConfig};
use docverify_similarity::QueryPlan;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::options::VerifierOptions;
use crate::runner::{run_config, ConfigResults};

/// Result of one config task
#[derive(Debug)]
pub struct ConfigOutcome {
    pub config: WindowConfig,
    pub result: Result<ConfigResults>,
}

impl ConfigOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn results(&self) -> Option<&ConfigResults> {
        self.result.as_ref().ok()
    }
}

/// Run every config concurrently and wait for all of them
///
/// A failing or panicking config is recorded in its own outcome and never
/// affects its siblings. Outcomes are returned in the order of `configs`.
pub fn run_all(
    configs: &[WindowConfig],
    text: &str,
    embedder: &dyn Embedder,
    plan: &QueryPlan,
    options: &VerifierOptions,
) -> Vec<ConfigOutcome> {
    if configs.is_empty() {
        return Vec::new();
    }

    let run_one = |config: &WindowConfig| -> ConfigOutcome {
        let config = *config;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            run_config(config, text, embedder, plan, options)
        }))
        .unwrap_or_else(|payload| {
            Err(Error::ConfigTaskFailure {
                config,
                reason: panic_message(payload.as_ref()),
            })
        });

        match &result {
            Ok(results) => debug!(config = %config, queries = results.len(), "config finished"),
            Err(e) => warn!(config = %config, error = %e, "config failed"),
        }
        ConfigOutcome { config, result }
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(configs.len())
        .thread_name(|i| format!("docverify-config-{}", i))
        .build()
    {
        Ok(pool) => pool.install(|| configs.par_iter().map(run_one).collect()),
        Err(e) => {
            warn!(error = %e, "could not start config pool, running configs sequentially");
            configs.iter().map(run_one).collect()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "config task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docverify_core::{HashEmbedder, Vector};
    use docverify_similarity::{FieldGroup, Query};

    const TEXT: &str = "ejendommen på Ørnevej 45 har et boligareal på 120 m2 og ligger i 8000 Aarhus C";

    fn plan() -> QueryPlan {
        let mut plan = QueryPlan::new();
        plan.push(Query::new("address", "Ørnevej 45", FieldGroup::Address), "Ørnevej 45");
        plan
    }

    /// Panics on windows that mention the street, so only some configs blow up
    struct PanickyEmbedder(HashEmbedder);

    impl Embedder for PanickyEmbedder {
        fn dim(&self) -> usize {
            self.0.dim()
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
            if texts.len() > 1 && texts.iter().all(|t| t.contains("Ørnevej")) {
                panic!("model crashed");
            }
            self.0.embed_batch(texts)
        }
    }

    #[test]
    fn test_outcomes_follow_config_order() {
        let configs = vec![
            WindowConfig::new(100, 50),
            WindowConfig::new(2, 0),
            WindowConfig::new(5, 2),
        ];
        let embedder = HashEmbedder::default();
        let outcomes = run_all(&configs, TEXT, &embedder, &plan(), &VerifierOptions::default());

        let order: Vec<WindowConfig> = outcomes.iter().map(|o| o.config).collect();
        assert_eq!(order, configs);
        assert!(outcomes.iter().all(ConfigOutcome::is_ok));
    }

    #[test]
    fn test_invalid_config_isolated() {
        let configs = vec![WindowConfig::new(4, 4), WindowConfig::new(5, 0)];
        let embedder = HashEmbedder::default();
        let outcomes = run_all(&configs, TEXT, &embedder, &plan(), &VerifierOptions::default());

        assert!(matches!(outcomes[0].result, Err(Error::InvalidConfig { .. })));
        let address = &outcomes[1].results().unwrap()["address"];
        assert_eq!(address.score, 100.0);
    }

    #[test]
    fn test_panic_isolated() {
        // the 100-word config embeds a single window; the 2-word config batches two
        let configs = vec![WindowConfig::new(100, 0), WindowConfig::new(2, 0)];
        let embedder = PanickyEmbedder(HashEmbedder::default());
        let text = "Ørnevej 45 Ørnevej 45";
        let outcomes = run_all(&configs, text, &embedder, &plan(), &VerifierOptions::default());

        assert!(outcomes[0].is_ok());
        match &outcomes[1].result {
            Err(Error::ConfigTaskFailure { config, reason }) => {
                assert_eq!(*config, WindowConfig::new(2, 0));
                assert_eq!(reason, "model crashed");
            }
            other => panic!("expected task failure, got {:?}", other),
        }
    }

    #[test]
    fn test_no_configs() {
        let embedder = HashEmbedder::default();
        assert!(run_all(&[], TEXT, &embedder, &plan(), &VerifierOptions::default()).is_empty());
    }
}
