//! # docverify Similarity
//!
//! Textual side of the verifier: what to look for and how well a piece of
//! text matches it.
//!
//! - [`GroundTruthRecord`] - Trusted field values, loaded from JSON
//! - [`build_queries`] - Grouped query strings derived from a record
//! - [`align`] - Best equal-length sub-phrase of a candidate window
//!
//! ## Example
//!
//! ```rust
//! use docverify_similarity::{align, build_queries, FieldGroup, GroundTruthRecord};
//!
//! let record = GroundTruthRecord::from_json(
//!     r#"{"address": {"streetName": "Ørnevej", "houseNumber": "45"}, "areaSize": 120}"#,
//! ).unwrap();
//! let plan = build_queries(&record);
//! let query = plan.group_queries(FieldGroup::Address).next().unwrap();
//!
//! let alignment = align(&query.text, "bygget på Ørnevej 45, med").unwrap();
//! assert_eq!(alignment.matched, "Ørnevej 45,");
//! assert_eq!(alignment.score, 100.0);
//! ```
//!
//! ## Scoring
//!
//! ```text
//! query  "Ørnevej 45"          ->  "ørnevej 45"
//! window "på Ornevej 45, med"  ->  [på ornevej] [ornevej 45] [45 med]
//!                                        |           |           |
//!                                      ratio       ratio       ratio
//!                                                    ^ best (90.0)
//! ```

pub mod aligner;
pub mod query;
pub mod record;

// Re-export main types for convenience
pub use aligner::{align, align_with, similarity, Alignment};
pub use query::{build_queries, FieldGroup, Query, QueryPlan, UnitOrder, AREA_UNITS};
pub use record::{FieldValue, GroundTruthRecord};
