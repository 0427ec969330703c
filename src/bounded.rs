//! Wall-clock bounded verification on a tokio runtime
//!
//! Verification is CPU-bound and runs on the blocking pool. A blocking task
//! cannot be cancelled, so on expiry [`verify_bounded`] returns without it and
//! the caller must shut its runtime down with `shutdown_background` (or
//! `shutdown_timeout`) instead of dropping it, which would wait for the task.

use anyhow::bail;
use docverify_engine::{VerificationReport, Verifier};
use docverify_similarity::GroundTruthRecord;
use std::time::Duration;

/// Whole-run bound for a per-config deadline
///
/// Configs run concurrently, so one extra period plus a second of slack
/// covers windowing, reconciliation and task startup.
pub fn run_bound(per_config: Duration) -> Duration {
    per_config
        .saturating_mul(2)
        .saturating_add(Duration::from_secs(1))
}

/// Run `verifier` on the blocking pool, giving up after `bound`
pub async fn verify_bounded(
    verifier: Verifier,
    record: GroundTruthRecord,
    text: String,
    bound: Option<Duration>,
) -> anyhow::Result<VerificationReport> {
    let task = tokio::task::spawn_blocking(move || verifier.verify(&record, &text));
    let report = match bound {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined??,
            Err(_) => bail!("verification did not finish within {:?}", limit),
        },
        None => task.await??,
    };
    Ok(report)
}
