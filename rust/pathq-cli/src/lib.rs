pub mod config;
pub mod graph;
pub mod grid;
