use std::fmt;
use std::hash::Hash;
use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::errors::SearchError;
use crate::models::{SearchResult, SearchStatus};
use crate::options::{SearchOptions, UpdatePolicy};

use super::arena::{NodeArena, NodeHandle, SearchNode};
use super::queue::PriorityQueue;

/// The graph a search walks, supplied implicitly through callbacks.
///
/// `key` is the identity of a node: two values that denote the same place
/// must produce equal keys, otherwise the search treats them as distinct.
/// Every method is expected to be deterministic for the duration of a call.
pub trait SearchSpace {
    type Node: Clone;
    type Key: Hash + Eq;

    fn is_end(&self, node: &Self::Node) -> bool;
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;
    /// Non-negative cost of the edge `from -> to`.
    fn distance(&self, from: &Self::Node, to: &Self::Node) -> f64;
    /// Estimate of the remaining cost to the nearest goal.
    fn heuristic(&self, node: &Self::Node) -> f64;
    fn key(&self, node: &Self::Node) -> Self::Key;
}

#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    node: NodeHandle,
}

fn by_f(a: &OpenEntry, b: &OpenEntry) -> std::cmp::Ordering {
    a.f.total_cmp(&b.f)
}

fn finish<N: Clone>(
    arena: &NodeArena<N>,
    status: SearchStatus,
    node: NodeHandle,
    expanded: u64,
) -> SearchResult<N> {
    let cost = arena.get(node).g;
    debug!(status = ?status, cost, expanded, nodes = arena.len(), "search finished");
    SearchResult {
        status,
        cost,
        path: arena.path_to(node),
        expanded,
    }
}

/// Best-first search from `start` to any node satisfying `space.is_end`.
///
/// Returns `Success` with the goal's cost and path, or, when the frontier is
/// exhausted (`NoPath`) or the timeout elapses (`Timeout`), the cost and path
/// of the node with the lowest heuristic reached so far. The timeout is
/// checked once per expansion, never in the middle of one.
pub fn astar<S: SearchSpace>(
    space: &S,
    start: S::Node,
    options: &SearchOptions,
) -> Result<SearchResult<S::Node>, SearchError> {
    options.validate()?;
    let timeout = options.timeout();
    let policy = options.update_policy;
    let started = Instant::now();

    let mut arena = NodeArena::new();
    let mut open_heap = PriorityQueue::with_comparator(by_f);
    let mut open_map: FxHashMap<S::Key, NodeHandle> = FxHashMap::default();
    let mut closed: FxHashSet<S::Key> = FxHashSet::default();
    let mut expanded: u64 = 0;

    let h0 = space.heuristic(&start);
    let start_key = space.key(&start);
    let root = arena.insert(SearchNode {
        data: start,
        parent: None,
        g: 0.0,
        h: h0,
        f: h0,
    });
    let mut best = root;
    open_heap.enqueue(OpenEntry { f: h0, node: root });
    open_map.insert(start_key, root);
    debug!(h0, ?timeout, ?policy, "search started");

    while !open_heap.is_empty() {
        if let Some(limit) = timeout {
            if started.elapsed() >= limit {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                debug!(elapsed_ms, "search budget exhausted");
                return Ok(finish(&arena, SearchStatus::Timeout, best, expanded));
            }
        }
        let Some(entry) = open_heap.dequeue() else { break };

        let (data, g) = {
            let n = arena.get(entry.node);
            (n.data.clone(), n.g)
        };
        let key = space.key(&data);
        // An earlier entry for this node already settled it.
        if closed.contains(&key) {
            continue;
        }
        open_map.remove(&key);

        if space.is_end(&data) {
            return Ok(finish(&arena, SearchStatus::Success, entry.node, expanded));
        }

        closed.insert(key);
        expanded += 1;
        trace!(node = entry.node.index(), g, f = entry.f, "expanding");

        for neighbor in space.neighbors(&data) {
            let nkey = space.key(&neighbor);
            if closed.contains(&nkey) {
                continue;
            }
            let tentative = g + space.distance(&data, &neighbor);

            if let Some(&handle) = open_map.get(&nkey) {
                let existing = arena.get_mut(handle);
                if existing.g <= tentative {
                    continue;
                }
                existing.parent = Some(entry.node);
                existing.g = tentative;
                existing.f = tentative + existing.h;
                if policy == UpdatePolicy::Reinsert {
                    open_heap.enqueue(OpenEntry {
                        f: existing.f,
                        node: handle,
                    });
                }
                continue;
            }

            let h = space.heuristic(&neighbor);
            let f = tentative + h;
            let handle = arena.insert(SearchNode {
                data: neighbor,
                parent: Some(entry.node),
                g: tentative,
                h,
                f,
            });
            open_map.insert(nkey, handle);
            open_heap.enqueue(OpenEntry { f, node: handle });
            if h < arena.get(best).h {
                best = handle;
            }
        }
    }

    Ok(finish(&arena, SearchStatus::NoPath, best, expanded))
}

type NodeFn<'a, N, R> = Box<dyn Fn(&N) -> R + 'a>;
type EdgeFn<'a, N> = Box<dyn Fn(&N, &N) -> f64 + 'a>;

/// Closure-driven configuration for a single [`astar`] call.
///
/// `start`, `is_end`, `neighbor`, `distance` and `heuristic` are required;
/// `run` reports the first missing one before doing any work. `hash`
/// defaults to the node's `Debug` rendering and the timeout to unbounded.
///
/// ```
/// use pathq_core::{PathSearch, SearchStatus};
///
/// let res = PathSearch::new()
///     .start(0u32)
///     .is_end(|n| *n == 4)
///     .neighbor(|n| if *n < 4 { vec![n + 1] } else { vec![] })
///     .distance(|_, _| 1.0)
///     .heuristic(|n| f64::from(4 - n))
///     .run()
///     .unwrap();
/// assert_eq!(res.status, SearchStatus::Success);
/// assert_eq!(res.path, vec![0, 1, 2, 3, 4]);
/// ```
pub struct PathSearch<'a, N> {
    start: Option<N>,
    is_end: Option<NodeFn<'a, N, bool>>,
    neighbor: Option<NodeFn<'a, N, Vec<N>>>,
    distance: Option<EdgeFn<'a, N>>,
    heuristic: Option<NodeFn<'a, N, f64>>,
    hash: Option<NodeFn<'a, N, String>>,
    options: SearchOptions,
}

impl<'a, N> Default for PathSearch<'a, N> {
    fn default() -> Self {
        Self {
            start: None,
            is_end: None,
            neighbor: None,
            distance: None,
            heuristic: None,
            hash: None,
            options: SearchOptions::default(),
        }
    }
}

impl<'a, N: Clone + fmt::Debug> PathSearch<'a, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: N) -> Self {
        self.start = Some(start);
        self
    }

    pub fn is_end(mut self, f: impl Fn(&N) -> bool + 'a) -> Self {
        self.is_end = Some(Box::new(f));
        self
    }

    pub fn neighbor(mut self, f: impl Fn(&N) -> Vec<N> + 'a) -> Self {
        self.neighbor = Some(Box::new(f));
        self
    }

    pub fn distance(mut self, f: impl Fn(&N, &N) -> f64 + 'a) -> Self {
        self.distance = Some(Box::new(f));
        self
    }

    pub fn heuristic(mut self, f: impl Fn(&N) -> f64 + 'a) -> Self {
        self.heuristic = Some(Box::new(f));
        self
    }

    pub fn hash(mut self, f: impl Fn(&N) -> String + 'a) -> Self {
        self.hash = Some(Box::new(f));
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: f64) -> Self {
        self.options.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.options.update_policy = policy;
        self
    }

    /// Replace every tunable at once, e.g. with options read from a file.
    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(self) -> Result<SearchResult<N>, SearchError> {
        let start = self.start.ok_or(SearchError::MissingParameter("start"))?;
        let space = CallbackSpace {
            is_end: self.is_end.ok_or(SearchError::MissingParameter("is_end"))?,
            neighbor: self.neighbor.ok_or(SearchError::MissingParameter("neighbor"))?,
            distance: self.distance.ok_or(SearchError::MissingParameter("distance"))?,
            heuristic: self.heuristic.ok_or(SearchError::MissingParameter("heuristic"))?,
            hash: self.hash,
        };
        astar(&space, start, &self.options)
    }
}

struct CallbackSpace<'a, N> {
    is_end: NodeFn<'a, N, bool>,
    neighbor: NodeFn<'a, N, Vec<N>>,
    distance: EdgeFn<'a, N>,
    heuristic: NodeFn<'a, N, f64>,
    hash: Option<NodeFn<'a, N, String>>,
}

impl<'a, N: Clone + fmt::Debug> SearchSpace for CallbackSpace<'a, N> {
    type Node = N;
    type Key = String;

    fn is_end(&self, node: &N) -> bool {
        (self.is_end)(node)
    }

    fn neighbors(&self, node: &N) -> Vec<N> {
        (self.neighbor)(node)
    }

    fn distance(&self, from: &N, to: &N) -> f64 {
        (self.distance)(from, to)
    }

    fn heuristic(&self, node: &N) -> f64 {
        (self.heuristic)(node)
    }

    fn key(&self, node: &N) -> String {
        match &self.hash {
            Some(hash) => hash(node),
            None => format!("{:?}", node),
        }
    }
}
