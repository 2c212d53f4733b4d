use crate::viewport::{initial_center, locate_viewport};
use crate::{Camera, Canvas, PlanView, Surface, VertexId, ViewError, Viewport};
use plan_tree_layout::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User interaction bound to a node, produced for the rendering surface
/// and handed back to [`PlanView::dispatch`] when triggered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewAction {
    /// Collapse or expand the node's descendants
    Toggle(VertexId),
    /// Select the node and move the camera onto it
    Locate(VertexId),
}

impl<D> PlanView<D> {
    /// # Errors
    /// Returns an error if no node has this id
    pub fn toggle_action(&self, id: &VertexId) -> Result<ViewAction, ViewError> {
        self.position_of(id)?;
        Ok(ViewAction::Toggle(id.clone()))
    }

    /// # Errors
    /// Returns an error if no node has this id
    pub fn locate_action(&self, id: &VertexId) -> Result<ViewAction, ViewError> {
        self.position_of(id)?;
        Ok(ViewAction::Locate(id.clone()))
    }

    /// Mark a single node as selected
    ///
    /// # Errors
    /// Returns an error if no node has this id
    pub fn select(&mut self, id: &VertexId) -> Result<(), ViewError> {
        let target = self.position_of(id)?;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.is_selected = i == target;
        }
        Ok(())
    }

    /// Select a node and compute the camera offset that centers it on a
    /// canvas of the given size
    ///
    /// # Errors
    /// Returns an error if no node has this id
    pub fn locate(&mut self, id: &VertexId, canvas: Vec2) -> Result<Viewport, ViewError> {
        self.select(id)?;
        let position = self.nodes[self.position_of(id)?].position;
        Ok(locate_viewport(position, canvas, &self.config))
    }

    /// Run an action against the rendering surface
    ///
    /// # Errors
    /// Returns an error if the action names an unknown node
    pub fn dispatch(
        &mut self,
        action: &ViewAction,
        surface: &mut impl Surface<D>,
    ) -> Result<(), ViewError> {
        debug!("Dispatching {action:?}");
        match action {
            ViewAction::Toggle(id) => {
                self.toggle(id)?;
            }
            ViewAction::Locate(id) => {
                let viewport = self.locate(id, surface.size())?;
                surface.set_viewport(viewport, self.config.locate_duration());
            }
        }
        surface.commit(&self.nodes);
        Ok(())
    }

    /// Point the camera at the default focus, before anything is selected
    pub fn focus_initial(&self, camera: &mut impl Camera, canvas: &impl Canvas) {
        camera.set_center(initial_center(canvas.size(), &self.config));
    }
}
