use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "timeout")]
    Timeout,
    #[serde(rename = "noPath")]
    NoPath,
}

/// Outcome of one search call.
///
/// On `Success` the path ends at the goal node that was reached. On
/// `Timeout` and `NoPath` it ends at the node with the lowest heuristic
/// seen, and `cost` is that node's cost from the start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<N> {
    pub status: SearchStatus,
    pub cost: f64,
    pub path: Vec<N>,
    pub expanded: u64,
}

impl<N> SearchResult<N> {
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }
}
