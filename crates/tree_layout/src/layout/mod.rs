mod forward;
mod overlaps;

use crate::{LayoutTree, NodeIdx};
use overlaps::resolve_overlaps;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while laying out a tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Overlap resolution kept finding work after the allowed passes
    #[error("overlap resolution did not settle after {passes} passes")]
    NotConverged { passes: usize },

    /// Two nodes of the same level have no common ancestor
    #[error("nodes {left} and {right} share no ancestor")]
    Disconnected { left: NodeIdx, right: NodeIdx },
}

/// Configuration for the centered tree layout
#[derive(Debug, Clone)]
pub struct TreeLayout {
    /// Maximum number of bottom-up scans during overlap resolution
    pub max_overlap_passes: usize,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            max_overlap_passes: 100_000,
        }
    }
}

/// Outcome of a layout run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Bottom-up scans made by overlap resolution, including the clean one
    pub passes: usize,

    /// Subtree moves made by overlap resolution
    pub corrections: usize,

    /// Nodes whose x differs from the previous layout
    pub moved: Vec<NodeIdx>,
}

impl TreeLayout {
    pub fn new(max_overlap_passes: usize) -> Self {
        Self { max_overlap_passes }
    }

    /// Position every node of the tree in place
    ///
    /// Children are first spread evenly below their parent, top-down. Then
    /// neighbours that are inverted or closer than one pitch are pushed
    /// apart, bottom-up, until every level is clean.
    ///
    /// # Errors
    /// Returns an error if overlap resolution exceeds the pass limit
    pub fn layout<P>(&self, tree: &mut LayoutTree<P>) -> Result<LayoutReport, LayoutError> {
        tree.place_children(tree.root);
        let stats = resolve_overlaps(tree, self.max_overlap_passes)?;
        let moved = tree.settle();

        debug!(
            "Laid out {} nodes: {} corrections over {} passes, {} moved",
            tree.len(),
            stats.corrections,
            stats.passes,
            moved.len()
        );

        Ok(LayoutReport {
            passes: stats.passes,
            corrections: stats.corrections,
            moved,
        })
    }
}

impl<P> LayoutTree<P> {
    /// Lay the tree out with the default [`TreeLayout`]
    pub fn layout(&mut self) -> Result<LayoutReport, LayoutError> {
        TreeLayout::default().layout(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Spacing, TreeBuilder};
    use test_log::test;

    #[test]
    fn chain_with_fork_is_symmetric() {
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
        let mut tree = builder.build(Spacing::default()).unwrap();
        let pitch = tree.spacing().horizontal_pitch();

        let report = tree.layout().unwrap();

        assert_eq!(report.corrections, 0);
        assert_eq!(tree[b].x() + tree[c].x(), 2.0 * tree[a].x());
        assert!(tree[c].x() - tree[b].x() >= pitch);
        assert_eq!(tree[leaf].x(), tree[b].x());
        assert_eq!(tree[leaf].y(), 3.0 * tree.spacing().vertical_pitch());
    }

    #[test]
    fn second_layout_moves_nothing() {
        let mut builder = TreeBuilder::new();
        let root = builder.add_node(());
        let kids: Vec<_> = (0..4).map(|_| builder.add_node(())).collect();
        for &kid in &kids {
            builder.link(root, kid).unwrap();
        }
        let mut tree = builder.build(Spacing::default()).unwrap();

        let first = tree.layout().unwrap();
        let second = tree.layout().unwrap();

        assert_eq!(first.moved, kids);
        assert!(second.moved.is_empty());
        for &kid in &kids {
            assert_eq!(tree[kid].last_settled_x(), tree[kid].x());
        }
    }
}
