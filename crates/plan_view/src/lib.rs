//! Execution plan graphs as render-ready tree layouts
//!
//! A plan arrives as a list of [`Vertex`] records linked by in and out
//! edges. [`build_tree`] turns it into a [`LayoutTree`], the layout
//! positions every node, and [`PlanView`] flattens the result into node and
//! edge lists for a node/edge based rendering surface. The view then keeps
//! the interaction state: collapsed subtrees, selection and camera moves.
//!
//! # Example
//!
//! ```
//! use plan_view::{PlanView, Vertex, ViewConfig};
//!
//! let vertices: Vec<Vertex> = vec![
//!     Vertex::new("scan").with_out_edge("filter", 1_500.0).with_duration(4.0),
//!     Vertex::new("filter").with_in_edge("scan", 1_500.0).with_duration(1.0),
//! ];
//!
//! let mut view = PlanView::new(vertices, Some(5.0), ViewConfig::default()).unwrap();
//! assert_eq!(view.edges()[0].label.to_string(), "1.50K");
//!
//! view.toggle(&"scan".into()).unwrap();
//! assert!(view.node(&"filter".into()).unwrap().hidden);
//! ```

mod action;
mod builder;
mod config;
mod encoding;
mod error;
mod surface;
mod vertex;
mod view;
mod visibility;

pub mod viewport;

pub use action::ViewAction;
pub use builder::build_tree;
pub use config::ViewConfig;
pub use encoding::{compact_unit, edge_width_level, CompactValue};
pub use error::{BuildError, ConfigError, ViewError};
pub use surface::{Camera, Canvas, Focus, NodeSink, Surface, Viewport};
pub use vertex::{Extra, InEdge, OutEdge, Vertex, VertexId};
pub use view::{FlatEdge, FlatNode, PlanSnapshot, PlanView};

// Re-export the geometry the view is expressed in
pub use plan_tree_layout::{LayoutTree, Point, Spacing, Vec2};
