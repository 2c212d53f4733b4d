use crate::{LayoutTree, NodeIdx, Point};

impl<P> LayoutTree<P> {
    /// Spread the children of `from` evenly below it, then do the same for
    /// every descendant, parents first
    ///
    /// Each child subtree is moved rigidly so that the child lands on its
    /// slot. Subtree widths are ignored here: sibling subtrees may overlap
    /// after this pass.
    pub fn place_children(&mut self, from: NodeIdx) {
        let pitch_x = self.spacing.horizontal_pitch();
        let pitch_y = self.spacing.vertical_pitch();

        let mut stack = vec![from];
        while let Some(parent) = stack.pop() {
            let origin = self[parent].pos;
            let children = self[parent].children.clone();
            let start = origin.x - children.len().saturating_sub(1) as f64 * pitch_x / 2.0;

            for (i, &child) in children.iter().enumerate() {
                let slot = Point::new(start + i as f64 * pitch_x, origin.y + pitch_y);
                let delta = slot - self[child].pos;
                self.translate(child, delta);
            }

            stack.extend(children.iter().rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Point, Spacing, TreeBuilder, Vec2};
    use test_log::test;

    #[test]
    fn children_are_centered_under_parent() {
        let spacing = Spacing::new(Vec2::new(100.0, 40.0), Vec2::new(20.0, 20.0));
        let mut builder = TreeBuilder::new();
        let root = builder.add_node(());
        let kids: Vec<_> = (0..3).map(|_| builder.add_node(())).collect();
        let grandchild = builder.add_node(());
        for &kid in &kids {
            builder.link(root, kid).unwrap();
        }
        builder.link(kids[2], grandchild).unwrap();
        let mut tree = builder.build(spacing).unwrap();

        tree.place_children(root);

        assert_eq!(tree[kids[0]].pos(), Point::new(-120.0, 60.0));
        assert_eq!(tree[kids[1]].pos(), Point::new(0.0, 60.0));
        assert_eq!(tree[kids[2]].pos(), Point::new(120.0, 60.0));
        assert_eq!(tree[grandchild].pos(), Point::new(120.0, 120.0));
    }

    #[test]
    fn leaf_is_left_alone() {
        let mut builder = TreeBuilder::new();
        let root = builder.add_node(());
        let mut tree = builder.build(Spacing::default()).unwrap();

        tree.place_children(root);

        assert_eq!(tree[root].pos(), Point::origin());
    }

    #[test]
    fn sibling_subtrees_can_overlap() {
        let spacing = Spacing::default();
        let mut builder = TreeBuilder::new();
        let root = builder.add_node(());
        let left = builder.add_node(());
        let right = builder.add_node(());
        let inner = [builder.add_node(()), builder.add_node(())];
        let outer = [builder.add_node(()), builder.add_node(())];
        builder.link(root, left).unwrap();
        builder.link(root, right).unwrap();
        for node in inner {
            builder.link(left, node).unwrap();
        }
        for node in outer {
            builder.link(right, node).unwrap();
        }
        let mut tree = builder.build(spacing).unwrap();

        tree.place_children(root);

        // Right child of `left` and left child of `right` share a slot
        assert_eq!(tree[inner[1]].x(), tree[outer[0]].x());
    }
}
