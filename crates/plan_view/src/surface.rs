//! Collaborators provided by the rendering surface

use crate::FlatNode;
use plan_tree_layout::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Camera placement: the offset applied to the scene, and its zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// Point the camera looks at, and its zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Focus {
    pub center: Point,
    pub zoom: f64,
}

pub trait Camera {
    fn set_center(&mut self, focus: Focus);

    /// Move the camera, animating over `duration`
    fn set_viewport(&mut self, viewport: Viewport, duration: Duration);
}

/// Reports the pixel size of the drawing area
pub trait Canvas {
    fn size(&self) -> Vec2;
}

impl Canvas for Vec2 {
    fn size(&self) -> Vec2 {
        *self
    }
}

/// Receives the node list after every change, to re-render from it
pub trait NodeSink<D> {
    fn commit(&mut self, nodes: &[FlatNode<D>]);
}

// Blanket implementation for closures
impl<D, F> NodeSink<D> for F
where
    F: FnMut(&[FlatNode<D>]),
{
    fn commit(&mut self, nodes: &[FlatNode<D>]) {
        self(nodes)
    }
}

/// Everything a view needs from the rendering surface
pub trait Surface<D>: Camera + Canvas + NodeSink<D> {}

impl<D, T> Surface<D> for T where T: Camera + Canvas + NodeSink<D> {}
