//! The transit graph.
//!
//! Each stop is split into two vertices so that the wait before boarding is
//! paid once per stop visited, whichever bus is boarded next:
//!
//! ```text
//!   2i  --wait-->  2i+1  --ride bus b over k stops-->  2j
//! ```
//!
//! The numbering is part of the public contract: callers query routes from
//! [`arrival_vertex`] to [`arrival_vertex`] so the origin's wait is always
//! included.

mod builder;
mod directed;
mod edge_info;

pub use builder::{GraphBuilder, TransitGraph};
pub use directed::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
pub use edge_info::{EdgeInfo, EdgeTable};

use crate::domain::StopId;

/// Vertex of a stop before waiting: where rides arrive.
pub fn arrival_vertex(stop: StopId) -> VertexId {
    VertexId(2 * stop.0)
}

/// Vertex of a stop after waiting: where rides depart.
pub fn boarding_vertex(stop: StopId) -> VertexId {
    VertexId(2 * stop.0 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_numbering() {
        assert_eq!(arrival_vertex(StopId(0)), VertexId(0));
        assert_eq!(boarding_vertex(StopId(0)), VertexId(1));
        assert_eq!(arrival_vertex(StopId(7)), VertexId(14));
        assert_eq!(boarding_vertex(StopId(7)), VertexId(15));
    }
}
