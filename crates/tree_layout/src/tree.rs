use crate::{Point, Spacing, Vec2};
use derive_more::{Display, From};
use std::collections::{HashMap, VecDeque};
use std::ops::Index;
use thiserror::Error;
use tracing::debug;

/// Position of a node in the tree arena
///
/// Indices follow insertion order, so they double as the source order of
/// the nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
#[display("#{_0}")]
pub struct NodeIdx(usize);

impl NodeIdx {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Errors that can occur while assembling a tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("every node has a parent, there is no root")]
    NoRoot,

    #[error("{} parentless nodes, expected a single root", .0.len())]
    MultipleRoots(Vec<NodeIdx>),

    #[error("node {0} is not part of this tree")]
    UnknownNode(NodeIdx),

    #[error("node {child} already has parent {parent}")]
    AlreadyParented { child: NodeIdx, parent: NodeIdx },

    /// Linking would make the node one of its own ancestors
    #[error("linking node {0} would create a cycle")]
    Cycle(NodeIdx),

    #[error("node {0} cannot be reached from the root")]
    Unreachable(NodeIdx),
}

/// A tree node carrying an opaque payload and its current coordinates
#[derive(Debug, Clone)]
pub struct PositionedNode<P> {
    pub payload: P,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) children: Vec<NodeIdx>,
    pub(crate) depth: usize,
    pub(crate) pos: Point,
    pub(crate) last_settled_x: f64,
}

impl<P> PositionedNode<P> {
    fn new(payload: P) -> Self {
        Self {
            payload,
            parent: None,
            children: Vec::new(),
            depth: 0,
            pos: Point::origin(),
            last_settled_x: 0.0,
        }
    }

    pub fn parent(&self) -> Option<NodeIdx> {
        self.parent
    }

    /// Children in link order, which is not necessarily left to right
    pub fn children(&self) -> &[NodeIdx] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    /// The x this node had when the previous layout finished
    pub fn last_settled_x(&self) -> f64 {
        self.last_settled_x
    }
}

/// Incrementally collects nodes and parent links, then freezes them into a
/// [`LayoutTree`]
#[derive(Debug)]
pub struct TreeBuilder<P> {
    nodes: Vec<PositionedNode<P>>,
}

impl<P> Default for TreeBuilder<P> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<P> TreeBuilder<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a parentless node at origin
    pub fn add_node(&mut self, payload: P) -> NodeIdx {
        self.nodes.push(PositionedNode::new(payload));
        NodeIdx(self.nodes.len() - 1)
    }

    pub fn parent_of(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Append `child` to the children of `parent`
    ///
    /// # Errors
    /// Fails when either node is unknown, when `child` already has a parent,
    /// or when `child` is an ancestor of `parent` (or `parent` itself).
    pub fn link(&mut self, parent: NodeIdx, child: NodeIdx) -> Result<(), TreeError> {
        for node in [parent, child] {
            if node.0 >= self.nodes.len() {
                return Err(TreeError::UnknownNode(node));
            }
        }

        if let Some(existing) = self.nodes[child.0].parent {
            return Err(TreeError::AlreadyParented {
                child,
                parent: existing,
            });
        }

        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(TreeError::Cycle(child));
            }
            cursor = self.nodes[node.0].parent;
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Pick the root, assign depths and fill the depth buckets
    ///
    /// # Errors
    /// Fails unless exactly one node is parentless and every node descends
    /// from it.
    pub fn build(mut self, spacing: Spacing) -> Result<LayoutTree<P>, TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }

        let roots: Vec<NodeIdx> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| NodeIdx(i))
            .collect();

        let root = match roots.as_slice() {
            [] => return Err(TreeError::NoRoot),
            [root] => *root,
            _ => return Err(TreeError::MultipleRoots(roots)),
        };

        // Depths are derived from the final links, so the order in which
        // links were made does not matter
        let mut reached = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            reached[node.0] = true;
            let depth = self.nodes[node.0].depth;
            for i in 0..self.nodes[node.0].children.len() {
                let child = self.nodes[node.0].children[i];
                self.nodes[child.0].depth = depth + 1;
                queue.push_back(child);
            }
        }

        // Links are cycle-checked, so this only triggers on a broken arena
        if let Some(missing) = reached.iter().position(|&r| !r) {
            return Err(TreeError::Unreachable(NodeIdx(missing)));
        }

        let depth_buckets = depth_buckets(&self.nodes);
        debug!(
            "Built tree of {} nodes over {} levels",
            self.nodes.len(),
            depth_buckets.len()
        );

        Ok(LayoutTree {
            nodes: self.nodes,
            root,
            depth_buckets,
            spacing,
        })
    }
}

/// Group nodes by depth in source order
///
/// Within a level, nodes are ordered first by the rank of their parent in
/// the level above and then by source order. When the source order already
/// agrees with the parent level this is plain source order; otherwise
/// cousins follow their parents, so no two levels disagree on order.
fn depth_buckets<P>(nodes: &[PositionedNode<P>]) -> Vec<Vec<NodeIdx>> {
    let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
    let mut buckets = vec![Vec::new(); max_depth + 1];
    for (i, node) in nodes.iter().enumerate() {
        buckets[node.depth].push(NodeIdx(i));
    }

    for depth in 1..buckets.len() {
        let rank: HashMap<NodeIdx, usize> = buckets[depth - 1]
            .iter()
            .enumerate()
            .map(|(rank, &node)| (node, rank))
            .collect();
        buckets[depth].sort_by_key(|&node| {
            let parent_rank = nodes[node.0]
                .parent
                .and_then(|p| rank.get(&p).copied())
                .unwrap_or(usize::MAX);
            (parent_rank, node)
        });
    }

    buckets
}

/// A positioned tree stored as an arena of nodes
#[derive(Debug, Clone)]
pub struct LayoutTree<P> {
    pub(crate) nodes: Vec<PositionedNode<P>>,
    pub(crate) root: NodeIdx,
    pub(crate) depth_buckets: Vec<Vec<NodeIdx>>,
    pub(crate) spacing: Spacing,
}

impl<P> LayoutTree<P> {
    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, a tree owns at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, node: NodeIdx) -> Option<&PositionedNode<P>> {
        self.nodes.get(node.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &PositionedNode<P>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
    }

    /// Nodes of each depth, in the order used for overlap detection
    pub fn depth_buckets(&self) -> &[Vec<NodeIdx>] {
        &self.depth_buckets
    }

    /// Depth-first walk from the root, parents before children
    pub fn pre_order(&self) -> PreOrder<'_, P> {
        PreOrder {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// `node` and every node below it
    pub fn subtree(&self, node: NodeIdx) -> PreOrder<'_, P> {
        PreOrder {
            tree: self,
            stack: vec![node],
        }
    }

    /// Rigidly move `node` and all its descendants
    pub fn translate(&mut self, node: NodeIdx, delta: Vec2) {
        if delta.is_zero() {
            return;
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let n = &mut self.nodes[current.0];
            n.pos += delta;
            stack.extend_from_slice(&n.children);
        }
    }

    /// Record the current x of every node as settled, returning the nodes
    /// whose x changed since the previous call
    pub(crate) fn settle(&mut self) -> Vec<NodeIdx> {
        let mut moved = Vec::new();
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if node.pos.x != node.last_settled_x {
                moved.push(NodeIdx(i));
                node.last_settled_x = node.pos.x;
            }
        }
        moved
    }
}

impl<P> Index<NodeIdx> for LayoutTree<P> {
    type Output = PositionedNode<P>;

    fn index(&self, node: NodeIdx) -> &Self::Output {
        &self.nodes[node.0]
    }
}

/// Pre-order iterator over a tree or subtree
pub struct PreOrder<'a, P> {
    tree: &'a LayoutTree<P>,
    stack: Vec<NodeIdx>,
}

impl<P> Iterator for PreOrder<'_, P> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[node.0].children.iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn chain_with_fork() -> (TreeBuilder<&'static str>, [NodeIdx; 5]) {
        let mut builder = TreeBuilder::new();
        let root = builder.add_node("root");
        let a = builder.add_node("a");
        let b = builder.add_node("b");
        let c = builder.add_node("c");
        let leaf = builder.add_node("leaf");
        builder.link(root, a).unwrap();
        builder.link(a, b).unwrap();
        builder.link(a, c).unwrap();
        builder.link(b, leaf).unwrap();
        (builder, [root, a, b, c, leaf])
    }

    #[test]
    fn build_assigns_depth_and_buckets() {
        let (builder, [root, a, b, c, leaf]) = chain_with_fork();
        let tree = builder.build(Spacing::default()).unwrap();

        assert_eq!(tree.root(), root);
        assert_eq!(tree[root].depth(), 0);
        assert_eq!(tree[leaf].depth(), 3);
        assert_eq!(
            tree.depth_buckets(),
            &[vec![root], vec![a], vec![b, c], vec![leaf]]
        );
        assert_eq!(tree[a].children(), &[b, c]);
        assert_eq!(tree[leaf].parent(), Some(b));
    }

    #[test]
    fn depth_does_not_depend_on_link_order() {
        let mut builder = TreeBuilder::new();
        let leaf = builder.add_node(());
        let mid = builder.add_node(());
        let root = builder.add_node(());
        builder.link(mid, leaf).unwrap();
        builder.link(root, mid).unwrap();
        let tree = builder.build(Spacing::default()).unwrap();

        assert_eq!(tree.root(), root);
        for (idx, node) in tree.nodes() {
            if let Some(parent) = node.parent() {
                assert_eq!(node.depth(), tree[parent].depth() + 1, "depth of {idx}");
            }
        }
        assert_eq!(tree[leaf].depth(), 2);
    }

    #[test]
    fn buckets_follow_parent_level_order() {
        let mut builder = TreeBuilder::new();
        let root = builder.add_node("root");
        let left = builder.add_node("left");
        let right = builder.add_node("right");
        // Listed before the child of `left` even though `right` comes second
        let right_child = builder.add_node("right child");
        let left_child = builder.add_node("left child");
        builder.link(root, left).unwrap();
        builder.link(root, right).unwrap();
        builder.link(right, right_child).unwrap();
        builder.link(left, left_child).unwrap();
        let tree = builder.build(Spacing::default()).unwrap();

        assert_eq!(tree.depth_buckets()[2], vec![left_child, right_child]);
    }

    #[test]
    fn rejects_empty_and_multiple_roots() {
        let builder = TreeBuilder::<()>::new();
        assert_eq!(builder.build(Spacing::default()).unwrap_err(), TreeError::Empty);

        let mut builder = TreeBuilder::new();
        let first = builder.add_node(());
        let second = builder.add_node(());
        assert_eq!(
            builder.build(Spacing::default()).unwrap_err(),
            TreeError::MultipleRoots(vec![first, second])
        );
    }

    #[test]
    fn link_rejects_second_parent_and_cycles() {
        let mut builder = TreeBuilder::new();
        let a = builder.add_node(());
        let b = builder.add_node(());
        let c = builder.add_node(());
        builder.link(a, b).unwrap();
        builder.link(b, c).unwrap();

        assert_eq!(
            builder.link(c, b),
            Err(TreeError::AlreadyParented { child: b, parent: a })
        );
        assert_eq!(builder.link(c, a), Err(TreeError::Cycle(a)));
        assert_eq!(builder.link(a, a), Err(TreeError::Cycle(a)));
        assert_eq!(
            builder.link(a, NodeIdx(7)),
            Err(TreeError::UnknownNode(NodeIdx(7)))
        );
    }

    #[test]
    fn pre_order_visits_parents_first_in_child_order() {
        let (builder, [root, a, b, c, leaf]) = chain_with_fork();
        let tree = builder.build(Spacing::default()).unwrap();

        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![root, a, b, leaf, c]);
        assert_eq!(tree.subtree(b).collect::<Vec<_>>(), vec![b, leaf]);
    }

    #[test]
    fn translate_moves_whole_subtree() {
        let (builder, [root, a, b, c, leaf]) = chain_with_fork();
        let mut tree = builder.build(Spacing::default()).unwrap();

        tree.translate(b, Vec2::new(10.0, 5.0));

        assert_eq!(tree[b].pos(), Point::new(10.0, 5.0));
        assert_eq!(tree[leaf].pos(), Point::new(10.0, 5.0));
        for untouched in [root, a, c] {
            assert_eq!(tree[untouched].pos(), Point::origin());
        }
    }
}
