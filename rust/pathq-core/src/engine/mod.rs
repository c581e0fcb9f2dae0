pub mod arena;
pub mod heuristics;
pub mod queue;
pub mod search;

pub use arena::{NodeArena, NodeHandle, SearchNode};
pub use queue::{Comparator, PriorityQueue};
pub use search::{astar, PathSearch, SearchSpace};
