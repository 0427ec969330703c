//! # docverify
//!
//! Audit automatically extracted document text against a trusted record.
//!
//! Given a ground-truth record (street, house number, postal code, district,
//! area size) and the noisy text of a document, docverify reports for each
//! field group the best textual evidence found and a 0-100 confidence score,
//! tolerating OCR noise, missing diacritics, punctuation and reordering.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! docverify --record Ornevej-45.json --text extracted_text.txt --pretty
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use docverify::prelude::*;
//! use std::sync::Arc;
//!
//! // Build the embedder once and share it
//! let embedder: Arc<dyn Embedder> = Arc::new(HashEmbedder::default());
//! let verifier = Verifier::new(embedder);
//!
//! let record = GroundTruthRecord::from_json(
//!     r#"{"address": {"streetName": "Ørnevej", "houseNumber": "45"}, "areaSize": 120}"#,
//! ).unwrap();
//! let report = verifier
//!     .verify(&record, "bygget på Ørnevej 45 med et samlet areal på 120 m2")
//!     .unwrap();
//!
//! let address = report.field(FieldGroup::Address).unwrap();
//! assert_eq!(address.confidence, 100.0);
//! ```
//!
//! ## Crate Structure
//!
//! - `docverify-core` - Windowing, vectors, embedders, L2 similarity index
//! - `docverify-similarity` - Records, query building, phrase alignment
//! - `docverify-engine` - Config runner, orchestrator, reconciler, report
//! - [`bounded`] - Wall-clock bounded runs on a tokio runtime

pub mod bounded;

pub use bounded::{run_bound, verify_bounded};

// Re-export core types
pub use docverify_core::{
    window, Embedder, EmbedderBuilder, Error, HashEmbedder, Result, SimilarityIndex, Vector,
    Window, WindowConfig,
};

// Re-export similarity
pub use docverify_similarity::{
    align, align_with, build_queries, Alignment, FieldGroup, FieldValue, GroundTruthRecord, Query,
    QueryPlan,
};

// Re-export engine
pub use docverify_engine::{
    verify, verify_with, CandidateResult, FieldReport, GroupVerdict, MatchStatus,
    VerificationReport, Verifier, VerifierOptions,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Embedder, Error, FieldGroup, GroundTruthRecord, HashEmbedder, MatchStatus, Result,
        VerificationReport, Verifier, VerifierOptions, WindowConfig,
    };
}
