//! Single-source shortest-path trees (Dijkstra).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{DirectedWeightedGraph, EdgeId, VertexId};

/// Best known distance to a vertex and the edge it was reached by.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Label {
    distance: f64,
    via: Option<EdgeId>,
}

/// Heap entry ordered so that `BinaryHeap` pops the cheapest vertex first.
///
/// Ties on cost are broken by vertex id, which keeps the search order (and
/// therefore the chosen path among equal-cost ones) stable between runs.
#[derive(Debug)]
struct Candidate {
    distance: f64,
    vertex: VertexId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Shortest distances and predecessor edges from one source to every
/// reachable vertex.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: VertexId,
    labels: Vec<Option<Label>>,
}

impl ShortestPathTree {
    /// Run Dijkstra from `source`. Edge weights must be non-negative.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a vertex of `graph`.
    pub fn compute(graph: &DirectedWeightedGraph, source: VertexId) -> Self {
        assert!(
            source.0 < graph.vertex_count(),
            "source {source:?} outside graph of {} vertices",
            graph.vertex_count()
        );

        let mut labels: Vec<Option<Label>> = vec![None; graph.vertex_count()];
        let mut settled = vec![false; graph.vertex_count()];
        let mut to_see = BinaryHeap::new();

        labels[source.0] = Some(Label {
            distance: 0.0,
            via: None,
        });
        to_see.push(Candidate {
            distance: 0.0,
            vertex: source,
        });

        while let Some(Candidate { distance, vertex }) = to_see.pop() {
            if std::mem::replace(&mut settled[vertex.0], true) {
                continue;
            }

            for &edge_id in graph.outgoing(vertex) {
                let edge = graph.edge(edge_id);
                // Settled labels are final, so predecessors always form a tree
                if settled[edge.to.0] {
                    continue;
                }
                let candidate = distance + edge.weight;

                let improves = match labels[edge.to.0] {
                    Some(label) => candidate < label.distance,
                    None => true,
                };
                if !improves {
                    continue;
                }

                labels[edge.to.0] = Some(Label {
                    distance: candidate,
                    via: Some(edge_id),
                });
                to_see.push(Candidate {
                    distance: candidate,
                    vertex: edge.to,
                });
            }
        }

        Self { source, labels }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Shortest distance to `target`, or `None` if it is unreachable.
    pub fn distance_to(&self, target: VertexId) -> Option<f64> {
        self.labels.get(target.0).copied().flatten().map(|l| l.distance)
    }

    /// Edges of the shortest path to `target`, in travel order.
    ///
    /// The path to the source itself is empty.
    pub fn path_to(&self, graph: &DirectedWeightedGraph, target: VertexId) -> Option<Vec<EdgeId>> {
        let mut label = self.labels.get(target.0).copied().flatten()?;

        let mut path = Vec::new();
        while let Some(edge_id) = label.via {
            path.push(edge_id);
            let previous = graph.edge(edge_id).from;
            if previous == self.source {
                break;
            }
            label = self.labels[previous.0]?;
        }
        path.reverse();
        Some(path)
    }

    /// Number of vertices reachable from the source, the source included.
    pub fn reachable_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }
}
