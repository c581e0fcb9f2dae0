use thiserror::Error;

/// Configuration problems detected before a search starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("missing required search parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("invalid timeout: {0} ms")]
    InvalidTimeout(f64),
    #[error("unknown update policy `{0}` (expected `reinsert` or `stale`)")]
    UnknownPolicy(String),
}
