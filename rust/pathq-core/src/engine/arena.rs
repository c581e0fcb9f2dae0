/// Index of a [`SearchNode`] inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One visited or frontier position of a search.
#[derive(Clone, Debug)]
pub struct SearchNode<N> {
    pub data: N,
    pub parent: Option<NodeHandle>,
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

/// Append-only storage for the search tree.
///
/// A parent link always names a node that was already expanded when the link
/// was set, and expanded nodes are never re-parented, so walking parent links
/// terminates at the start node.
#[derive(Debug)]
pub struct NodeArena<N> {
    nodes: Vec<SearchNode<N>>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<N> NodeArena<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode<N>) -> NodeHandle {
        debug_assert!(node.parent.map_or(true, |p| p.0 < self.nodes.len()));
        self.nodes.push(node);
        NodeHandle(self.nodes.len() - 1)
    }

    #[inline]
    pub fn get(&self, handle: NodeHandle) -> &SearchNode<N> {
        &self.nodes[handle.0]
    }

    #[inline]
    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut SearchNode<N> {
        &mut self.nodes[handle.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N: Clone> NodeArena<N> {
    /// Node values from the root of the tree down to `handle`, inclusive.
    pub fn path_to(&self, handle: NodeHandle) -> Vec<N> {
        let mut path = Vec::new();
        let mut cur = Some(handle);
        while let Some(h) = cur {
            let node = self.get(h);
            path.push(node.data.clone());
            cur = node.parent;
        }
        path.reverse();
        path
    }
}
