use crate::{
    build_tree, compact_unit, edge_width_level, CompactValue, Extra, Vertex, VertexId, ViewConfig,
    ViewError,
};
use plan_tree_layout::{LayoutTree, Point};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Render-ready record of one plan node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNode<D = Extra> {
    pub id: VertexId,
    pub name: Option<String>,
    pub position: Point,
    pub has_child: bool,

    /// Share of the plan's total duration, rounded to two decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,

    pub is_open: bool,
    pub is_selected: bool,
    pub hidden: bool,
    pub data: D,
}

/// Render-ready record of one parent to child edge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatEdge {
    pub id: String,
    pub source: VertexId,
    pub target: VertexId,
    pub weight: f64,
    pub width_level: u8,
    pub label: CompactValue,
}

/// Immutable copy of a view's output, safe to hand to a deferred renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSnapshot<D = Extra> {
    pub nodes: Vec<FlatNode<D>>,
    pub edges: Vec<FlatEdge>,
}

/// Flat node and edge lists of a laid out plan, plus the interaction state
/// kept on them
#[derive(Debug, Clone)]
pub struct PlanView<D = Extra> {
    pub(crate) nodes: Vec<FlatNode<D>>,
    pub(crate) edges: Vec<FlatEdge>,
    pub(crate) index: HashMap<VertexId, usize>,
    /// Out-edge targets of each node, by node position
    pub(crate) out_links: Vec<Vec<VertexId>>,
    pub(crate) config: ViewConfig,
}

fn percentage(duration: Option<f64>, total: Option<f64>) -> Option<f64> {
    let total = total.filter(|t| t.is_finite() && *t > 0.0)?;
    let share = duration? / total * 100.0;
    Some((share * 100.0).round() / 100.0)
}

impl<D: Clone> PlanView<D> {
    /// Build, lay out and flatten a plan in one go
    ///
    /// # Errors
    /// Returns an error if the vertices do not form a single tree or the
    /// layout fails to settle
    pub fn new(
        vertices: Vec<Vertex<D>>,
        total_duration: Option<f64>,
        config: ViewConfig,
    ) -> Result<Self, ViewError> {
        let mut tree = build_tree(vertices, config.spacing)?;
        config.engine().layout(&mut tree)?;
        Ok(Self::from_tree(&tree, total_duration, config))
    }

    /// Flatten a laid out tree, parents before children
    pub fn from_tree(
        tree: &LayoutTree<Vertex<D>>,
        total_duration: Option<f64>,
        config: ViewConfig,
    ) -> Self {
        let mut nodes = Vec::with_capacity(tree.len());
        let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
        let mut index = HashMap::with_capacity(tree.len());
        let mut out_links = Vec::with_capacity(tree.len());

        for idx in tree.pre_order() {
            let node = &tree[idx];
            let vertex = &node.payload;

            index.insert(vertex.id.clone(), nodes.len());
            out_links.push(vertex.out_edges.iter().map(|e| e.to.clone()).collect());
            nodes.push(FlatNode {
                id: vertex.id.clone(),
                name: vertex.name.clone(),
                position: node.pos(),
                has_child: vertex.has_children(),
                percentage: percentage(vertex.duration, total_duration),
                is_open: true,
                is_selected: false,
                hidden: false,
                data: vertex.data.clone(),
            });

            if let Some(parent) = node.parent() {
                let parent = &tree[parent].payload;
                let weight = vertex
                    .in_edges
                    .first()
                    .map(|e| e.weight)
                    .or_else(|| {
                        parent
                            .out_edges
                            .iter()
                            .find(|e| e.to == vertex.id)
                            .map(|e| e.weight)
                    })
                    .unwrap_or_default();
                edges.push(FlatEdge {
                    id: format!("{}-{}", parent.id, vertex.id),
                    source: parent.id.clone(),
                    target: vertex.id.clone(),
                    weight,
                    width_level: edge_width_level(weight),
                    label: compact_unit(weight),
                });
            }
        }

        debug!("Flattened plan into {} nodes, {} edges", nodes.len(), edges.len());

        Self {
            nodes,
            edges,
            index,
            out_links,
            config,
        }
    }

    pub fn snapshot(&self) -> PlanSnapshot<D> {
        PlanSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

impl<D> PlanView<D> {
    pub fn nodes(&self) -> &[FlatNode<D>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlatEdge] {
        &self.edges
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn node(&self, id: &VertexId) -> Option<&FlatNode<D>> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Nodes not hidden by a collapsed ancestor
    pub fn visible_nodes(&self) -> impl Iterator<Item = &FlatNode<D>> {
        self.nodes.iter().filter(|n| !n.hidden)
    }

    pub(crate) fn position_of(&self, id: &VertexId) -> Result<usize, ViewError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ViewError::UnknownNode(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn fork() -> Vec<Vertex> {
        vec![
            Vertex::new("root")
                .with_out_edge("a", 2_000_000.0)
                .with_duration(10.0),
            Vertex::new("a")
                .with_in_edge("root", 2_000_000.0)
                .with_out_edge("b", 300.0)
                .with_out_edge("c", 70_000_000.0)
                .with_duration(5.0),
            Vertex::new("b")
                .with_in_edge("a", 300.0)
                .with_out_edge("leaf", 1.0)
                .with_duration(1.0 / 3.0),
            // No in-edge entry, the weight comes from the parent's out-edge
            Vertex::new("c").with_duration(2.0),
            Vertex::new("leaf").with_in_edge("b", 1.0),
        ]
    }

    #[test]
    fn flattens_in_pre_order() {
        let view = PlanView::new(fork(), Some(20.0), ViewConfig::default()).unwrap();

        let ids: Vec<&str> = view.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "b", "leaf", "c"]);
        assert!(view.nodes().iter().all(|n| n.is_open && !n.is_selected && !n.hidden));
    }

    #[test]
    fn derives_display_fields() {
        let view = PlanView::new(fork(), Some(20.0), ViewConfig::default()).unwrap();

        let root = view.node(&"root".into()).unwrap();
        assert!(root.has_child);
        assert_eq!(root.percentage, Some(50.0));

        let b = view.node(&"b".into()).unwrap();
        assert_eq!(b.percentage, Some(1.67));

        let leaf = view.node(&"leaf".into()).unwrap();
        assert!(!leaf.has_child);
        assert_eq!(leaf.percentage, None);
    }

    #[test]
    fn percentage_needs_a_usable_total() {
        for total in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
            let view = PlanView::new(fork(), total, ViewConfig::default()).unwrap();
            assert!(view.nodes().iter().all(|n| n.percentage.is_none()), "{total:?}");
        }
    }

    #[test]
    fn edges_carry_child_weight() {
        let view = PlanView::new(fork(), None, ViewConfig::default()).unwrap();

        let edges: Vec<(&str, f64, u8)> = view
            .edges()
            .iter()
            .map(|e| (e.id.as_str(), e.weight, e.width_level))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("root-a", 2_000_000.0, 3),
                ("a-b", 300.0, 1),
                ("b-leaf", 1.0, 1),
                ("a-c", 70_000_000.0, 5),
            ]
        );
        assert_eq!(view.edges()[0].label, CompactValue::Scaled("2.00M".into()));
    }

    #[test]
    fn serializes_for_the_web_surface() {
        let view = PlanView::new(fork(), Some(20.0), ViewConfig::default()).unwrap();

        let json = serde_json::to_value(view.snapshot()).unwrap();

        let root = &json["nodes"][0];
        assert_eq!(root["id"], "root");
        assert_eq!(root["hasChild"], true);
        assert_eq!(root["isOpen"], true);
        assert_eq!(root["position"]["x"], 0.0);
        assert_eq!(json["edges"][0]["widthLevel"], 3);
        assert_eq!(json["edges"][0]["label"], "2.00M");
    }
}
