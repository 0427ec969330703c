use crate::window::WindowConfig;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid window configuration: overlap {overlap} must be smaller than size {size}")]
    InvalidConfig { size: usize, overlap: usize },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Config {config} exceeded its deadline after {elapsed_ms}ms")]
    Timeout { config: WindowConfig, elapsed_ms: u128 },

    #[error("Config {config} failed: {reason}")]
    ConfigTaskFailure { config: WindowConfig, reason: String },

    #[error("All {attempted} window configurations failed")]
    AllConfigsFailed { attempted: usize },

    #[error("Record error: {0}")]
    Record(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_config() {
        let err = Error::Timeout {
            config: WindowConfig::new(5, 0),
            elapsed_ms: 1200,
        };
        assert_eq!(err.to_string(), "Config 5:0 exceeded its deadline after 1200ms");

        let err = Error::InvalidConfig { size: 3, overlap: 3 };
        assert!(err.to_string().contains("overlap 3 must be smaller than size 3"));
    }
}
