use crate::{Focus, ViewConfig, Viewport};
use plan_tree_layout::{Point, Vec2};

/// Camera offset that puts the box of a node at `node` in the middle of the
/// canvas, below the top gap
pub fn locate_viewport(node: Point, canvas: Vec2, config: &ViewConfig) -> Viewport {
    let spacing = &config.spacing;
    Viewport {
        x: -node.x + canvas.x / 2.0 - spacing.node_width / 2.0,
        y: -node.y + canvas.y / 2.0 - spacing.node_height / 2.0 - config.top_gap,
        zoom: config.zoom,
    }
}

/// Default camera focus, used before any node is selected
pub fn initial_center(canvas: Vec2, config: &ViewConfig) -> Focus {
    Focus {
        center: Point::new(
            config.spacing.node_width / 2.0,
            canvas.y / 2.0 - config.top_gap,
        ),
        zoom: config.zoom,
    }
}
