//! # docverify Core
//!
//! Core library for docverify, the ground-truth document verifier.
//!
//! This crate provides the retrieval building blocks:
//!
//! - [`window()`] - Overlapping word windows for one [`WindowConfig`]
//! - [`Vector`] - Dense embedding vector with SIMD L2 distance
//! - [`Embedder`] - The injected embedding capability, plus [`HashEmbedder`]
//! - [`SimilarityIndex`] - Exact L2 nearest-neighbour search over windows
//!
//! ## Example
//!
//! ```rust
//! use docverify_core::{window, HashEmbedder, SimilarityIndex, WindowConfig};
//!
//! let text = "huset ligger på Ørnevej 45 i Aarhus";
//! let windows = window(text, WindowConfig::new(3, 1)).unwrap();
//!
//! let embedder = HashEmbedder::default();
//! let index = SimilarityIndex::build(windows, &embedder).unwrap();
//! let hits = index.search("Ørnevej 45", &embedder, 2).unwrap();
//! assert!(hits[0].0.text.contains("Ørnevej"));
//! ```

pub mod embedder;
pub mod error;
pub mod index;
pub mod text;
pub mod vector;
pub mod window;

/// SIMD-optimized vector operations
///
/// AVX2/FMA on x86_64 with a scalar fallback.
pub mod simd;

pub use embedder::{Embedder, EmbedderBuilder, HashEmbedder, DEFAULT_EMBEDDING_DIM};
pub use error::{Error, Result};
pub use index::{SimilarityIndex, DEFAULT_TOP_K};
pub use vector::Vector;
pub use window::{window, Window, WindowConfig};
