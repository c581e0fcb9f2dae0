use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pathq_core::engine::heuristics::euclidean;
use pathq_core::SearchSpace;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GraphFile {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    nodes: HashMap<String, Point>,
    edges: Vec<EdgeSpec>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeSpec {
    from: String,
    to: String,
    #[serde(default = "unit_cost")]
    cost: f64,
}

fn unit_cost() -> f64 {
    1.0
}

/// Weighted graph loaded from JSON, searched towards a single goal id.
///
/// The heuristic is the straight-line distance to the goal when both ends
/// carry coordinates and 0 otherwise. It is only admissible when no edge is
/// cheaper than the distance between its endpoints.
#[derive(Debug)]
pub struct WeightedGraph {
    adjacency: HashMap<String, Vec<(String, f64)>>,
    coords: HashMap<String, (f64, f64)>,
    goal: String,
}

impl WeightedGraph {
    pub fn from_json_str(text: &str, goal: &str) -> Result<Self> {
        let file: GraphFile = serde_json::from_str(text).context("parse graph json")?;
        let mut adjacency: HashMap<String, Vec<(String, f64)>> = HashMap::new();
        for e in &file.edges {
            if !(e.cost >= 0.0) {
                bail!("edge {} -> {} has invalid cost {}", e.from, e.to, e.cost);
            }
            adjacency.entry(e.from.clone()).or_default().push((e.to.clone(), e.cost));
            if !file.directed {
                adjacency.entry(e.to.clone()).or_default().push((e.from.clone(), e.cost));
            }
        }
        let coords = file.nodes.into_iter().map(|(id, p)| (id, (p.x, p.y))).collect();
        Ok(Self {
            adjacency,
            coords,
            goal: goal.to_string(),
        })
    }

    pub fn load(path: &Path, goal: &str) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&text, goal).with_context(|| format!("load graph {}", path.display()))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

impl SearchSpace for WeightedGraph {
    type Node = String;
    type Key = String;

    fn is_end(&self, node: &String) -> bool {
        *node == self.goal
    }

    fn neighbors(&self, node: &String) -> Vec<String> {
        self.adjacency
            .get(node)
            .map(|out| out.iter().map(|(to, _)| to.clone()).collect())
            .unwrap_or_default()
    }

    fn distance(&self, from: &String, to: &String) -> f64 {
        // Parallel edges: the cheapest one wins.
        self.adjacency
            .get(from)
            .into_iter()
            .flatten()
            .filter(|(t, _)| t == to)
            .map(|(_, c)| *c)
            .fold(f64::INFINITY, f64::min)
    }

    fn heuristic(&self, node: &String) -> f64 {
        match (self.coords.get(node), self.coords.get(&self.goal)) {
            (Some(a), Some(b)) => euclidean(*a, *b),
            _ => 0.0,
        }
    }

    fn key(&self, node: &String) -> String {
        node.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathq_core::{astar, SearchOptions, SearchStatus};

    const TRIANGLE: &str = r#"{
        "nodes": { "a": {"x": 0, "y": 0}, "b": {"x": 3, "y": 0}, "c": {"x": 3, "y": 4} },
        "edges": [
            { "from": "a", "to": "c", "cost": 9 },
            { "from": "a", "to": "b", "cost": 3 },
            { "from": "b", "to": "c", "cost": 4 }
        ]
    }"#;

    #[test]
    fn undirected_edges_go_both_ways() {
        let g = WeightedGraph::from_json_str(TRIANGLE, "a").unwrap();
        assert_eq!(g.edge_count(), 6);
        let res = astar(&g, "c".to_string(), &SearchOptions::default()).unwrap();
        assert_eq!(res.status, SearchStatus::Success);
        assert_eq!(res.cost, 7.0);
        assert_eq!(res.path, vec!["c", "b", "a"]);
    }

    #[test]
    fn directed_graph_has_no_way_back() {
        let text = TRIANGLE.replacen("{", "{ \"directed\": true,", 1);
        let g = WeightedGraph::from_json_str(&text, "a").unwrap();
        assert_eq!(g.edge_count(), 3);
        let res = astar(&g, "c".to_string(), &SearchOptions::default()).unwrap();
        assert_eq!(res.status, SearchStatus::NoPath);
        assert_eq!(res.path, vec!["c"]);
    }

    #[test]
    fn heuristic_uses_coordinates_when_present() {
        let g = WeightedGraph::from_json_str(TRIANGLE, "c").unwrap();
        assert_eq!(g.heuristic(&"a".to_string()), 5.0);
        assert_eq!(g.heuristic(&"zzz".to_string()), 0.0);
        assert_eq!(g.distance(&"a".to_string(), &"b".to_string()), 3.0);
    }

    #[test]
    fn rejects_negative_costs() {
        let text = r#"{ "edges": [ { "from": "a", "to": "b", "cost": -1 } ] }"#;
        let err = WeightedGraph::from_json_str(text, "b").unwrap_err();
        assert!(err.to_string().contains("invalid cost"));
    }

    #[test]
    fn missing_cost_defaults_to_one() {
        let text = r#"{ "edges": [ { "from": "a", "to": "b" } ] }"#;
        let g = WeightedGraph::from_json_str(text, "b").unwrap();
        let res = astar(&g, "a".to_string(), &SearchOptions::default()).unwrap();
        assert_eq!(res.cost, 1.0);
    }
}
