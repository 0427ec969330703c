//! Phrase alignment
//!
//! Finds the contiguous sub-phrase of a candidate window that best matches a
//! query phrase of the same token length. Scores are normalized indel ratios
//! in [0.0, 100.0] computed on punctuation-free text, so `"Ørnevej, 45."` and
//! `"Ørnevej 45"` are indistinguishable. Case is folded unless the caller
//! asks for case-sensitive scoring with [`align_with`].

use docverify_core::text::{normalize_token, strip_punctuation};
use serde::Serialize;

/// Best-scoring sub-phrase of a candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alignment {
    /// The candidate's original tokens at the best position, joined by spaces
    pub matched: String,
    /// Normalized similarity, 100 = identical after normalization
    pub score: f32,
    /// Token offset of the match inside the candidate
    pub start: usize,
}

/// Slide a `len(query tokens)` window over `candidate` and keep the best
/// position, leftmost on ties.
///
/// Returns `None` when the query has no tokens or the candidate has fewer
/// tokens than the query; callers treat that as a non-match.
pub fn align(query: &str, candidate: &str) -> Option<Alignment> {
    align_with(query, candidate, false)
}

/// [`align`] with explicit case handling
pub fn align_with(query: &str, candidate: &str, case_sensitive: bool) -> Option<Alignment> {
    let query_tokens: Vec<&str> = query.split_whitespace().collect();
    let candidate_tokens: Vec<&str> = candidate.split_whitespace().collect();
    let n = query_tokens.len();
    if n == 0 || candidate_tokens.len() < n {
        return None;
    }

    let query_norm: Vec<char> = join_normalized(&query_tokens, case_sensitive).chars().collect();
    let candidate_norm: Vec<String> = candidate_tokens
        .iter()
        .map(|t| normalize(t, case_sensitive))
        .collect();

    let mut best: Option<(usize, f32)> = None;
    for start in 0..=(candidate_tokens.len() - n) {
        let phrase: Vec<char> = join_non_empty(&candidate_norm[start..start + n]).chars().collect();
        let score = ratio(&query_norm, &phrase);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((start, score));
        }
    }

    best.map(|(start, score)| Alignment {
        matched: candidate_tokens[start..start + n].join(" "),
        score,
        start,
    })
}

/// Similarity of two strings after the same normalization `align` applies
pub fn similarity(a: &str, b: &str) -> f32 {
    let a: Vec<&str> = a.split_whitespace().collect();
    let b: Vec<&str> = b.split_whitespace().collect();
    let a: Vec<char> = join_normalized(&a, false).chars().collect();
    let b: Vec<char> = join_normalized(&b, false).chars().collect();
    ratio(&a, &b)
}

fn normalize(token: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        strip_punctuation(token)
    } else {
        normalize_token(token)
    }
}

fn join_normalized(tokens: &[&str], case_sensitive: bool) -> String {
    let normalized: Vec<String> = tokens.iter().map(|t| normalize(t, case_sensitive)).collect();
    join_non_empty(&normalized)
}

fn join_non_empty(tokens: &[String]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `100 * (1 - indel / (len_a + len_b))`, where the indel distance counts
/// insertions and deletions only (a substitution costs 2)
fn ratio(a: &[char], b: &[char]) -> f32 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let lcs = lcs_len(a, b);
    200.0 * lcs as f32 / total as f32
}

/// Longest common subsequence length, two-row dynamic programming
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
