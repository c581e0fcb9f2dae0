pub mod engine;
pub mod errors;
pub mod models;
pub mod options;

pub use engine::{astar, PathSearch, PriorityQueue, SearchSpace};
pub use errors::SearchError;
pub use models::{SearchResult, SearchStatus};
pub use options::{SearchOptions, UpdatePolicy};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
