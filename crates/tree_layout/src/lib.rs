//! Centered tree layout with bottom-up overlap resolution
//!
//! This crate positions the nodes of a rooted tree on a grid of fixed-size
//! boxes. Each parent gets its children spread evenly underneath it, then
//! neighbours that ended up too close on the same level are pushed apart
//! until no level overlaps. It does not aim for the narrowest drawing.
//!
//! Nodes are stored in an arena and addressed by [`NodeIdx`]; the payload
//! type is opaque to the layout.
//!
//! # Example
//!
//! ```
//! use plan_tree_layout::{Spacing, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! let root = builder.add_node("scan");
//! let left = builder.add_node("filter");
//! let right = builder.add_node("project");
//! builder.link(root, left).unwrap();
//! builder.link(root, right).unwrap();
//!
//! let mut tree = builder.build(Spacing::default()).unwrap();
//! let report = tree.layout().unwrap();
//!
//! let pitch = tree.spacing().horizontal_pitch();
//! assert!(tree[right].x() - tree[left].x() >= pitch);
//! assert_eq!(report.corrections, 0);
//! ```

mod geometry;
mod spacing;
mod tree;

pub mod layout;

pub use geometry::{Point, Vec2};
pub use spacing::Spacing;
pub use tree::{LayoutTree, NodeIdx, PositionedNode, PreOrder, TreeBuilder, TreeError};

pub use layout::{LayoutError, LayoutReport, TreeLayout};
