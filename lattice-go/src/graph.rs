use serde::{Deserialize, Serialize};

use crate::Node;
use crate::error::GraphError;

/// The immutable topology the game is played on: nodes `0..node_count` and an
/// undirected adjacency built from an edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph", into = "RawGraph")]
pub struct BoardGraph {
    adjacency: Vec<Vec<Node>>,
    edge_count: usize,
}

/// Wire shape: `{ "nodes": N, "edges": [[a, b], ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGraph {
    nodes: usize,
    edges: Vec<(Node, Node)>,
}

impl BoardGraph {
    /// Validate the edge list and build adjacency sets. Duplicate edges are
    /// collapsed; out-of-range endpoints and self-loops are rejected.
    pub fn new(node_count: usize, edges: &[(Node, Node)]) -> Result<Self, GraphError> {
        let mut adjacency = vec![Vec::new(); node_count];

        for (i, &(a, b)) in edges.iter().enumerate() {
            for node in [a, b] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfRange {
                        edge: i,
                        node,
                        node_count,
                    });
                }
            }
            if a == b {
                return Err(GraphError::SelfLoop { edge: i, node: a });
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        let mut edge_count = 0;
        for (node, list) in adjacency.iter_mut().enumerate() {
            list.sort_unstable();
            list.dedup();
            edge_count += list.iter().filter(|&&n| n > node).count();
        }

        Ok(BoardGraph {
            adjacency,
            edge_count,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::Json(e.to_string()))
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, node: Node) -> bool {
        node < self.adjacency.len()
    }

    /// Nodes joined to `node` by an edge, ascending. Empty for unknown nodes.
    pub fn neighbors(&self, node: Node) -> &[Node] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Distinct edges normalized to `a < b`, in ascending order.
    pub fn edges(&self) -> Vec<(Node, Node)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (a, list) in self.adjacency.iter().enumerate() {
            edges.extend(list.iter().filter(|&&b| b > a).map(|&b| (a, b)));
        }
        edges
    }
}

impl TryFrom<RawGraph> for BoardGraph {
    type Error = GraphError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        BoardGraph::new(raw.nodes, &raw.edges)
    }
}

impl From<BoardGraph> for RawGraph {
    fn from(graph: BoardGraph) -> Self {
        RawGraph {
            nodes: graph.node_count(),
            edges: graph.edges(),
        }
    }
}
