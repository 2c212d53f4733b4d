use crate::{BuildError, Vertex, VertexId};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use plan_tree_layout::{LayoutTree, NodeIdx, Spacing, TreeBuilder, TreeError};
use std::collections::HashMap;
use tracing::debug;

/// Turn a plan's vertex list into a tree, one node per vertex
///
/// Out-edges become parent links. Edges to unknown ids are dropped, and a
/// vertex reached from a second parent stays under the first one. Nodes of
/// each depth keep the vertex-list order.
///
/// # Errors
/// Fails on an empty list, duplicate ids, a cyclic graph or more than one
/// parentless vertex.
pub fn build_tree<D>(
    vertices: Vec<Vertex<D>>,
    spacing: Spacing,
) -> Result<LayoutTree<Vertex<D>>, BuildError> {
    if vertices.is_empty() {
        return Err(BuildError::Empty);
    }

    let mut index = HashMap::with_capacity(vertices.len());
    for (i, vertex) in vertices.iter().enumerate() {
        if index.insert(vertex.id.clone(), i).is_some() {
            return Err(BuildError::DuplicateVertex(vertex.id.clone()));
        }
    }

    let mut graph = DiGraphMap::<usize, ()>::new();
    let mut links = Vec::new();
    for (from, vertex) in vertices.iter().enumerate() {
        graph.add_node(from);
        for edge in &vertex.out_edges {
            let Some(&to) = index.get(&edge.to) else {
                debug!("Dropping edge {} -> {}: unknown target", vertex.id, edge.to);
                continue;
            };
            if from == to {
                return Err(BuildError::Cycle(vertex.id.clone()));
            }
            graph.add_edge(from, to, ());
            links.push((from, to));
        }
    }

    toposort(&graph, None)
        .map_err(|cycle| BuildError::Cycle(vertices[cycle.node_id()].id.clone()))?;

    let ids: Vec<VertexId> = vertices.iter().map(|v| v.id.clone()).collect();
    let mut builder = TreeBuilder::with_capacity(vertices.len());
    let arena: Vec<NodeIdx> = vertices.into_iter().map(|v| builder.add_node(v)).collect();

    for (from, to) in links {
        match builder.link(arena[from], arena[to]) {
            Ok(()) => {}
            Err(TreeError::AlreadyParented { parent, .. }) => {
                debug!(
                    "Ignoring edge {} -> {}: already a child of {}",
                    ids[from],
                    ids[to],
                    ids[parent.index()]
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    builder.build(spacing).map_err(|e| match e {
        TreeError::MultipleRoots(roots) => {
            BuildError::MultipleRoots(roots.iter().map(|r| ids[r.index()].clone()).collect())
        }
        e => e.into(),
    })
}
