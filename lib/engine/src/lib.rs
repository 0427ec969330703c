//! # docverify Engine
//!
//! Multi-resolution retrieval and reconciliation.
//!
//! ## How it works
//!
//! 1. Queries are built from the ground-truth record, one group per field
//! 2. For every window config, concurrently: window the document, embed the
//!    windows once, retrieve the top-K windows per query, align the query
//!    inside each window
//! 3. The best alignment per group across all configs and query variants
//!    becomes the group's verdict
//!
//! ```text
//!               ┌────────────────┐
//!   record ────>│ Query Builder  │─────────────────┐
//!               └────────────────┘                 v
//!               ┌────────────────┐         ┌──────────────┐
//!   text ──┬───>│ config 5:0     │────────>│              │
//!          ├───>│ config 25:10   │────────>│  Reconciler  │──> report
//!          └───>│ config 100:50  │────────>│              │
//!               └────────────────┘         └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use docverify_core::HashEmbedder;
//! use docverify_engine::{Verifier, MatchStatus};
//! use docverify_similarity::{FieldGroup, GroundTruthRecord};
//! use std::sync::Arc;
//!
//! let record = GroundTruthRecord::from_json(
//!     r#"{"address": {"streetName": "Ørnevej", "houseNumber": "45"}, "areaSize": 120}"#,
//! ).unwrap();
//! let text = "bygget på Ørnevej 45 med et samlet areal på 120 m2";
//!
//! let verifier = Verifier::new(Arc::new(HashEmbedder::default()));
//! let report = verifier.verify(&record, text).unwrap();
//!
//! let area = report.field(FieldGroup::AreaSize).unwrap();
//! assert_eq!(area.matched.as_deref(), Some("120 m2"));
//! assert_eq!(area.status, MatchStatus::Matched);
//! ```

pub mod options;
pub mod orchestrator;
pub mod reconcile;
pub mod report;
pub mod runner;
pub mod verifier;

pub use options::{VerifierOptions, DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_MIN_SCORE};
pub use orchestrator::{run_all, ConfigOutcome};
pub use reconcile::{reconcile, GroupVerdict, Winner};
pub use report::{ConfigFailure, FieldReport, MatchStatus, VerificationReport};
pub use runner::{best_candidate, run_config, CandidateResult, ConfigResults, UNSCORED};
pub use verifier::{verify, verify_with, Verifier};
