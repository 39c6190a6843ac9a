//! Directed weighted graph with dense vertex and edge ids.

use std::fmt;

/// Vertex index in a [`DirectedWeightedGraph`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

/// Edge index, assigned in insertion order starting at 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

/// A weighted edge. Weights are non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// Adjacency-list graph over a fixed number of vertices.
#[derive(Debug, Clone, Default)]
pub struct DirectedWeightedGraph {
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl DirectedWeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn with_vertex_count(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            outgoing: vec![Vec::new(); vertex_count],
        }
    }

    /// Add an edge and return its id.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of this graph.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        assert!(
            edge.from.0 < self.outgoing.len() && edge.to.0 < self.outgoing.len(),
            "edge {:?} -> {:?} outside graph of {} vertices",
            edge.from,
            edge.to,
            self.outgoing.len()
        );
        debug_assert!(edge.weight >= 0.0, "negative edge weight {}", edge.weight);

        let id = EdgeId(self.edges.len());
        self.edges.push(edge);
        self.outgoing[edge.from.0].push(id);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up an edge.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Ids of the edges leaving `vertex`, in insertion order.
    pub fn outgoing(&self, vertex: VertexId) -> &[EdgeId] {
        &self.outgoing[vertex.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: usize, to: usize, weight: f64) -> Edge {
        Edge {
            from: VertexId(from),
            to: VertexId(to),
            weight,
        }
    }

    #[test]
    fn edge_ids_follow_insertion_order() {
        let mut graph = DirectedWeightedGraph::with_vertex_count(3);
        assert_eq!(graph.add_edge(edge(0, 1, 1.0)), EdgeId(0));
        assert_eq!(graph.add_edge(edge(1, 2, 2.0)), EdgeId(1));
        assert_eq!(graph.add_edge(edge(0, 2, 5.0)), EdgeId(2));

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge(EdgeId(1)).weight, 2.0);
    }

    #[test]
    fn outgoing_edges() {
        let mut graph = DirectedWeightedGraph::with_vertex_count(3);
        graph.add_edge(edge(0, 1, 1.0));
        graph.add_edge(edge(1, 2, 2.0));
        graph.add_edge(edge(0, 2, 5.0));

        assert_eq!(graph.outgoing(VertexId(0)), &[EdgeId(0), EdgeId(2)]);
        assert_eq!(graph.outgoing(VertexId(1)), &[EdgeId(1)]);
        assert!(graph.outgoing(VertexId(2)).is_empty());
    }

    #[test]
    #[should_panic(expected = "outside graph")]
    fn edge_outside_graph() {
        let mut graph = DirectedWeightedGraph::with_vertex_count(2);
        graph.add_edge(edge(0, 2, 1.0));
    }
}
