use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Display fields of a vertex that the layout does not interpret
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Stable identifier of a plan vertex
///
/// Accepts both strings and integers when deserializing.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, From, Display,
)]
#[serde(from = "RawVertexId")]
pub struct VertexId(String);

impl VertexId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VertexId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVertexId {
    Text(String),
    Number(i64),
}

impl From<RawVertexId> for VertexId {
    fn from(raw: RawVertexId) -> Self {
        match raw {
            RawVertexId::Text(id) => Self(id),
            RawVertexId::Number(id) => Self(id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutEdge {
    pub to: VertexId,
    #[serde(default)]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InEdge {
    pub from: VertexId,
    #[serde(default)]
    pub weight: f64,
}

/// One node of an execution plan graph as supplied by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex<D = Extra> {
    pub id: VertexId,

    #[serde(default)]
    pub out_edges: Vec<OutEdge>,

    #[serde(default)]
    pub in_edges: Vec<InEdge>,

    /// Time spent in this vertex, in the unit of the plan's total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub data: D,
}

impl<D: Default> Vertex<D> {
    pub fn new(id: impl Into<VertexId>) -> Self {
        Self {
            id: id.into(),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
            duration: None,
            name: None,
            data: D::default(),
        }
    }
}

impl<D> Vertex<D> {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_out_edge(mut self, to: impl Into<VertexId>, weight: f64) -> Self {
        self.out_edges.push(OutEdge {
            to: to.into(),
            weight,
        });
        self
    }

    pub fn with_in_edge(mut self, from: impl Into<VertexId>, weight: f64) -> Self {
        self.in_edges.push(InEdge {
            from: from.into(),
            weight,
        });
        self
    }

    pub fn has_children(&self) -> bool {
        !self.out_edges.is_empty()
    }
}
