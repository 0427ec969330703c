use crate::embedder::Embedder;
use crate::{Error, Result, Vector, Window};
use ordered_float::OrderedFloat;
use tracing::debug;

/// Default number of candidate windows retrieved per query
pub const DEFAULT_TOP_K: usize = 20;

/// Exact L2 nearest-neighbour index over the windows of one config
///
/// Window vectors are stored contiguously (`dim * len` floats) so a search is
/// a single linear scan. The build embeds every window in one batch call;
/// searches only embed the query.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    windows: Vec<Window>,
    vectors: Vec<f32>,
    dim: usize,
}

impl SimilarityIndex {
    /// Embed all windows in one batch pass
    pub fn build(windows: Vec<Window>, embedder: &dyn Embedder) -> Result<Self> {
        let dim = embedder.dim();
        if windows.is_empty() {
            return Ok(Self {
                windows,
                vectors: Vec::new(),
                dim,
            });
        }

        let texts: Vec<&str> = windows.iter().map(|w| w.text.as_str()).collect();
        let embedded = embedder.embed_batch(&texts)?;
        if embedded.len() != windows.len() {
            return Err(Error::Embedding(format!(
                "expected {} vectors, embedder returned {}",
                windows.len(),
                embedded.len()
            )));
        }

        let mut vectors = Vec::with_capacity(dim * windows.len());
        for vector in &embedded {
            if vector.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: vector.dim(),
                });
            }
            vectors.extend_from_slice(vector.as_slice());
        }

        debug!(windows = windows.len(), dim, "built similarity index");
        Ok(Self { windows, vectors, dim })
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    #[inline]
    fn vector_at(&self, idx: usize) -> &[f32] {
        let start = idx * self.dim;
        &self.vectors[start..start + self.dim]
    }

    /// Embed `query` and return up to `top_k` windows, nearest first
    ///
    /// Equal distances keep window order. An empty index returns an empty
    /// list without calling the embedder.
    pub fn search(
        &self,
        query: &str,
        embedder: &dyn Embedder,
        top_k: usize,
    ) -> Result<Vec<(&Window, f32)>> {
        if self.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        let query_vector = embedder.embed(query)?;
        self.search_vector(&query_vector, top_k)
    }

    /// Search with an already embedded query
    pub fn search_vector(&self, query: &Vector, top_k: usize) -> Result<Vec<(&Window, f32)>> {
        if self.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }

        let mut scored: Vec<(usize, f32)> = (0..self.windows.len())
            .map(|idx| {
                let dist = crate::simd::l2_distance_simd(query.as_slice(), self.vector_at(idx));
                (idx, dist)
            })
            .collect();
        scored.sort_by_key(|&(idx, dist)| (OrderedFloat(dist), idx));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(idx, dist)| (&self.windows[idx], dist))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::HashEmbedder;
    use crate::window::{window, WindowConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        inner: HashEmbedder,
        batches: AtomicUsize,
    }

    impl Embedder for CountingEmbedder {
        fn dim(&self) -> usize {
            self.inner.dim()
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            self.inner.embed_batch(texts)
        }
    }

    struct WrongDim;

    impl Embedder for WrongDim {
        fn dim(&self) -> usize {
            8
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
            Ok(texts.iter().map(|_| Vector::zeros(4)).collect())
        }
    }

    fn sample_windows() -> Vec<Window> {
        let text = "policen dækker huset på Ørnevej 45 i Aarhus samt et areal på 120 m2 beboelse";
        window(text, WindowConfig::new(3, 1)).unwrap()
    }

    #[test]
    fn test_search_ranks_nearest_first() {
        let embedder = HashEmbedder::default();
        let index = SimilarityIndex::build(sample_windows(), &embedder).unwrap();
        let results = index.search("Ørnevej 45", &embedder, 3).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].0.text.contains("Ørnevej 45"));
        assert!(results.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    }

    #[test]
    fn test_build_embeds_once() {
        let embedder = CountingEmbedder {
            inner: HashEmbedder::new(64),
            batches: AtomicUsize::new(0),
        };
        let index = SimilarityIndex::build(sample_windows(), &embedder).unwrap();
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 1);

        index.search("Aarhus", &embedder, 5).unwrap();
        index.search("120 m2", &embedder, 5).unwrap();
        // one call per query, none for the windows again
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_empty_index() {
        let embedder = CountingEmbedder {
            inner: HashEmbedder::new(64),
            batches: AtomicUsize::new(0),
        };
        let index = SimilarityIndex::build(Vec::new(), &embedder).unwrap();
        assert!(index.is_empty());
        assert!(index.search("Ørnevej 45", &embedder, 20).unwrap().is_empty());
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_top_k_truncates() {
        let embedder = HashEmbedder::default();
        let windows = sample_windows();
        let total = windows.len();
        let index = SimilarityIndex::build(windows, &embedder).unwrap();
        assert_eq!(index.search("huset", &embedder, 2).unwrap().len(), 2);
        assert_eq!(index.search("huset", &embedder, 100).unwrap().len(), total);
    }

    #[test]
    fn test_equal_distances_keep_window_order() {
        let embedder = HashEmbedder::new(32);
        let windows = window("a b a b a b", WindowConfig::new(2, 0)).unwrap();
        let index = SimilarityIndex::build(windows, &embedder).unwrap();
        let results = index.search("a b", &embedder, 3).unwrap();
        let order: Vec<usize> = results.iter().map(|(w, _)| w.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = SimilarityIndex::build(sample_windows(), &WrongDim).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 8, actual: 4 }));
    }
}
