use crate::{PlanView, VertexId, ViewError};
use std::collections::HashSet;
use tracing::debug;

impl<D> PlanView<D> {
    /// Collapse an open node or expand a collapsed one, returning whether it
    /// is open afterwards
    ///
    /// Collapsing hides every node reachable through out-edges and reopens
    /// them, so expanding again always shows the whole subtree expanded.
    /// Positions are left untouched.
    ///
    /// # Errors
    /// Returns an error if no node has this id
    pub fn toggle(&mut self, id: &VertexId) -> Result<bool, ViewError> {
        let target = self.position_of(id)?;
        let was_open = self.nodes[target].is_open;
        self.nodes[target].is_open = !was_open;

        let descendants = self.descendants(target);
        for &i in &descendants {
            let node = &mut self.nodes[i];
            node.hidden = was_open;
            if was_open {
                node.is_open = true;
            }
        }

        debug!(
            "{} {id}, {} descendants affected",
            if was_open { "Collapsed" } else { "Expanded" },
            descendants.len()
        );
        Ok(!was_open)
    }

    /// Positions of every node reachable from `start` through out-edges,
    /// each listed once
    fn descendants(&self, start: usize) -> Vec<usize> {
        let mut seen = HashSet::from([start]);
        let mut found = Vec::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            for target in &self.out_links[current] {
                // Targets missing from the view were dropped when building
                let Some(&next) = self.index.get(target) else {
                    continue;
                };
                if seen.insert(next) {
                    found.push(next);
                    stack.push(next);
                }
            }
        }

        found
    }
}
