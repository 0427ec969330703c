//! Word windowing
//!
//! Splits a document into overlapping runs of whitespace-separated words.
//! Each window config trades recall of short phrases (small windows) against
//! recall of long phrases (large windows).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (window size, overlap) pair, both measured in words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowConfig {
    pub size: usize,
    pub overlap: usize,
}

impl WindowConfig {
    #[inline]
    #[must_use]
    pub const fn new(size: usize, overlap: usize) -> Self {
        Self { size, overlap }
    }

    /// Check that the window start always advances
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.overlap >= self.size {
            return Err(Error::InvalidConfig {
                size: self.size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }

    /// Number of words the window start advances per step
    #[inline]
    pub fn step(&self) -> usize {
        self.size.saturating_sub(self.overlap)
    }

    /// The default set of granularities evaluated per run
    pub fn defaults() -> Vec<WindowConfig> {
        vec![
            WindowConfig::new(5, 0),
            WindowConfig::new(25, 10),
            WindowConfig::new(100, 50),
        ]
    }
}

impl fmt::Display for WindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.size, self.overlap)
    }
}

impl FromStr for WindowConfig {
    type Err = String;

    /// Parses `SIZE:OVERLAP`, e.g. `25:10`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (size, overlap) = s
            .split_once(':')
            .ok_or_else(|| format!("expected SIZE:OVERLAP, got '{}'", s))?;
        let size = size
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid window size '{}': {}", size, e))?;
        let overlap = overlap
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid overlap '{}': {}", overlap, e))?;
        Ok(WindowConfig::new(size, overlap))
    }
}

/// A contiguous word span of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Position in the config's window list
    pub index: usize,
    /// First token index (inclusive)
    pub start: usize,
    /// Last token index (exclusive)
    pub end: usize,
    /// The window's words joined by single spaces
    pub text: String,
}

impl Window {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `text` into windows of `config.size` words, advancing by
/// `config.size - config.overlap` words until every word is covered.
///
/// The final window may be shorter than `config.size`. Empty text yields an
/// empty list.
pub fn window(text: &str, config: WindowConfig) -> Result<Vec<Window>> {
    config.validate()?;

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let step = config.step();
    let mut windows = Vec::with_capacity(tokens.len() / step + 1);

    let mut start = 0;
    while start < tokens.len() {
        let end = (start + config.size).min(tokens.len());
        windows.push(Window {
            index: windows.len(),
            start,
            end,
            text: tokens[start..end].join(" "),
        });
        if end == tokens.len() {
            break;
        }
        start += step;
    }

    Ok(windows)
}
