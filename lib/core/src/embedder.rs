//! Embedding capability
//!
//! The engine never loads a model itself. Callers construct an [`Embedder`]
//! once and pass it in; every window config shares it read-only.
//!
//! [`HashEmbedder`] is the built-in deterministic implementation: character
//! trigrams and whole words of the normalized text are hashed into a fixed
//! number of buckets and the result is L2-normalized. Texts sharing many
//! trigrams land close together, which is what window retrieval needs for
//! OCR-garbled spellings.

use crate::text::normalized_words;
use crate::{Result, Vector};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Default dimension for hashed text embeddings
pub const DEFAULT_EMBEDDING_DIM: usize = 256;

/// Default weight of a whole-word hit relative to a trigram hit
pub const DEFAULT_WORD_WEIGHT: f32 = 2.0;

/// A text embedding function shared across worker threads
pub trait Embedder: Send + Sync {
    /// Dimension of every vector this embedder produces
    fn dim(&self) -> usize;

    /// Embed many texts in one pass, returning one vector per input in order
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>>;

    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vector> {
        let mut vectors = self.embed_batch(&[text])?;
        vectors
            .pop()
            .ok_or_else(|| crate::Error::Embedding("embedder returned no vector".to_string()))
    }
}

/// Deterministic trigram/word hashing embedder
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
    word_weight: f32,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim: dim.max(1),
            word_weight: DEFAULT_WORD_WEIGHT,
        }
    }

    fn bucket<T: Hash + ?Sized>(&self, value: &T) -> usize {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }

    /// Embed one text without going through the batch API
    pub fn embed_text(&self, text: &str) -> Vector {
        let mut vector = Vector::zeros(self.dim);
        let words = normalized_words(text);
        let data = vector.as_mut_slice();

        for trigram in generate_trigrams(&words.join(" ")) {
            data[self.bucket(&trigram)] += 1.0;
        }
        for word in &words {
            data[self.bucket(word.as_str())] += self.word_weight;
        }

        vector.normalize();
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

/// Builder for [`HashEmbedder`] with custom options
#[derive(Debug, Clone)]
pub struct EmbedderBuilder {
    dim: usize,
    word_weight: f32,
}

impl EmbedderBuilder {
    pub fn new() -> Self {
        Self {
            dim: DEFAULT_EMBEDDING_DIM,
            word_weight: DEFAULT_WORD_WEIGHT,
        }
    }

    pub fn dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    pub fn word_weight(mut self, weight: f32) -> Self {
        self.word_weight = weight;
        self
    }

    pub fn build(self) -> HashEmbedder {
        HashEmbedder {
            dim: self.dim.max(1),
            word_weight: self.word_weight,
        }
    }
}

impl Default for EmbedderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Character trigrams of a padded string
fn generate_trigrams(s: &str) -> HashSet<String> {
    if s.is_empty() {
        return HashSet::new();
    }
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();
    chars.windows(3).map(|w| w.iter().collect::<String>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_vector() {
        let embedder = HashEmbedder::default();
        let v1 = embedder.embed_text("Ørnevej 45");
        let v2 = embedder.embed_text("Ørnevej 45");
        assert_eq!(v1, v2);
        assert_eq!(v1.dim(), DEFAULT_EMBEDDING_DIM);
        assert!((v1.norm() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        let embedder = HashEmbedder::new(64);
        assert_eq!(embedder.embed_text("ØRNEVEJ, 45."), embedder.embed_text("ørnevej 45"));
    }

    #[test]
    fn test_similar_texts_are_closer() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed_text("Ørnevej 45");
        let noisy = embedder.embed_text("Ornevej 45");
        let unrelated = embedder.embed_text("forsikringen dækker brand og storm");
        assert!(query.l2_distance(&noisy) < query.l2_distance(&unrelated));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashEmbedder::new(16);
        let v = embedder.embed_text("  ,, ");
        assert_eq!(v.as_slice(), &[0.0; 16]);
    }

    #[test]
    fn test_batch_matches_single() {
        let embedder = HashEmbedder::default();
        let batch = embedder.embed_batch(&["120 m2", "8000 Aarhus C"]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1], embedder.embed("8000 Aarhus C").unwrap());
    }

    #[test]
    fn test_builder_pattern() {
        let embedder = EmbedderBuilder::new().dim(32).word_weight(1.0).build();
        assert_eq!(embedder.dim(), 32);
        assert_eq!(EmbedderBuilder::new().dim(0).build().dim(), 1);
    }
}
