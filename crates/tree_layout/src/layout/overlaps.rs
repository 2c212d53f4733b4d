use super::LayoutError;
use crate::{LayoutTree, NodeIdx, Vec2};
use tracing::trace;

/// Slack allowed on the spacing check to absorb float rounding
const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OverlapStats {
    pub passes: usize,
    pub corrections: usize,
}

impl<P> LayoutTree<P> {
    /// Whether `right` is not far enough to the right of `left`
    ///
    /// True when the pair is inverted (`left` is right of `right`) or closer
    /// than one horizontal pitch.
    pub fn is_overlaps(&self, left: NodeIdx, right: NodeIdx) -> bool {
        let a = self[left].x();
        let b = self[right].x();
        a > b || b - a < self.spacing.horizontal_pitch() - TOLERANCE
    }

    /// Walk both nodes up in lock-step until they are siblings and return
    /// the ancestor on the `right` side
    ///
    /// Returns `None` when no such level exists, e.g. for the root or for
    /// nodes of different depths whose chains never meet.
    pub fn common_ancestor_side(&self, left: NodeIdx, right: NodeIdx) -> Option<NodeIdx> {
        let (mut a, mut b) = (left, right);
        loop {
            match (self[a].parent, self[b].parent) {
                (Some(pa), Some(pb)) if pa == pb => return Some(b),
                (Some(pa), Some(pb)) => {
                    a = pa;
                    b = pb;
                }
                _ => return None,
            }
        }
    }

    /// Shift the children of `parent` so they are centered below it and
    /// return the applied horizontal shift
    ///
    /// A single child is aligned on the parent. Otherwise the midpoint of
    /// the first and last child, in child order, is.
    pub fn center_children(&mut self, parent: NodeIdx) -> f64 {
        let target = self[parent].x();
        let shift = match self[parent].children.as_slice() {
            [] => return 0.0,
            [only] => target - self[*only].x(),
            [first, .., last] => target - (self[*first].x() + self[*last].x()) / 2.0,
        };

        if shift != 0.0 {
            for child in self[parent].children.clone() {
                self.translate(child, Vec2::horizontal(shift));
            }
        }
        shift
    }

    /// First overlapping neighbour pair, scanning the deepest level first
    fn first_overlap(&self) -> Option<(NodeIdx, NodeIdx)> {
        self.depth_buckets.iter().rev().find_map(|bucket| {
            bucket
                .windows(2)
                .map(|pair| (pair[0], pair[1]))
                .find(|&(a, b)| self.is_overlaps(a, b))
        })
    }
}

/// Push overlapping subtrees apart until a full bottom-up scan is clean
///
/// Every correction moves the right-hand sibling subtree so the offending
/// pair ends up exactly one pitch apart, recenters that subtree's parent's
/// children and restarts the scan from the deepest level.
pub(crate) fn resolve_overlaps<P>(
    tree: &mut LayoutTree<P>,
    max_passes: usize,
) -> Result<OverlapStats, LayoutError> {
    let pitch = tree.spacing.horizontal_pitch();
    let mut stats = OverlapStats::default();

    loop {
        if stats.passes == max_passes {
            return Err(LayoutError::NotConverged { passes: max_passes });
        }
        stats.passes += 1;

        let Some((left, right)) = tree.first_overlap() else {
            break;
        };

        let dx = tree[left].x() + pitch - tree[right].x();
        let mover = tree
            .common_ancestor_side(left, right)
            .ok_or(LayoutError::Disconnected { left, right })?;
        trace!("Overlap between {left} and {right}, moving {mover} by {dx}");

        tree.translate(mover, Vec2::horizontal(dx));
        if let Some(parent) = tree[mover].parent {
            tree.center_children(parent);
        }
        stats.corrections += 1;
    }

    Ok(stats)
}
