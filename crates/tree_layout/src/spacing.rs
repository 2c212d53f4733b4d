use crate::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed node geometry shared by every node of a tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Width of a node box
    pub node_width: f64,

    /// Height of a node box
    pub node_height: f64,

    /// Minimum free space between two nodes of the same depth
    pub min_horizontal_gap: f64,

    /// Minimum free space between a node and its children
    pub min_vertical_gap: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 80.0,
            min_horizontal_gap: 40.0,
            min_vertical_gap: 60.0,
        }
    }
}

impl Spacing {
    /// Create spacing from a node size and the minimum gaps around it
    pub fn new(node_size: Vec2, gap: Vec2) -> Self {
        Self {
            node_width: node_size.x,
            node_height: node_size.y,
            min_horizontal_gap: gap.x,
            min_vertical_gap: gap.y,
        }
    }

    pub fn node_size(&self) -> Vec2 {
        Vec2::new(self.node_width, self.node_height)
    }

    /// Distance between the x of two neighbours on the same level
    pub fn horizontal_pitch(&self) -> f64 {
        self.node_width + self.min_horizontal_gap
    }

    /// Distance between the y of a parent and its children
    pub fn vertical_pitch(&self) -> f64 {
        self.node_height + self.min_vertical_gap
    }
}
