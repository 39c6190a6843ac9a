//! Builds the transit graph from a snapshot of the domain model.

use tracing::debug;

use crate::config::RoutingSettings;
use crate::domain::{Bus, BusKind, Stop, TransportSystem};
use crate::geo::road_distance;

use super::directed::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
use super::edge_info::{EdgeInfo, EdgeTable};
use super::{arrival_vertex, boarding_vertex};

/// A built transit graph together with the metadata of its edges.
///
/// Immutable: nothing can add edges once the builder hands it over.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    graph: DirectedWeightedGraph,
    edges: EdgeTable,
}

impl TransitGraph {
    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    pub fn edges(&self) -> &EdgeTable {
        &self.edges
    }

    /// Metadata of an edge.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn edge_info(&self, id: EdgeId) -> &EdgeInfo {
        &self.edges[id]
    }
}

/// Turns stops and buses into a graph with two vertices per stop.
///
/// Stop `i` becomes vertex `2i` (arrived) and `2i + 1` (waited, ready to
/// board). A wait edge joins the pair; ride edges go from the boarding
/// vertex of one stop to the arrival vertex of another.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    /// Minutes spent waiting at a stop before boarding.
    wait_time: f64,

    /// Bus speed in metres per minute.
    velocity: f64,
}

impl GraphBuilder {
    /// Create a builder. `velocity` is in metres per minute.
    pub fn new(wait_time: f64, velocity: f64) -> Self {
        Self {
            wait_time,
            velocity,
        }
    }

    /// Create a builder from wire-level routing settings.
    pub fn from_settings(settings: &RoutingSettings) -> Self {
        Self::new(settings.bus_wait_time, settings.velocity_m_per_min())
    }

    /// Build the graph for the current state of `system`.
    ///
    /// Every call starts from scratch, so rebuilding after the domain model
    /// or the parameters changed yields a graph that reflects the change.
    pub fn build(&self, system: &TransportSystem) -> TransitGraph {
        let stops = system.stops();
        let mut ctx = BuildContext {
            graph: DirectedWeightedGraph::with_vertex_count(2 * stops.len()),
            edges: EdgeTable::new(),
        };

        for stop in stops {
            ctx.add(
                arrival_vertex(stop.id),
                boarding_vertex(stop.id),
                self.wait_time,
                EdgeInfo::Wait {
                    stop_name: stop.name.clone(),
                    time: self.wait_time,
                },
            );
        }

        for bus in system.buses() {
            self.add_bus(&mut ctx, bus, stops);
        }

        debug!(
            vertices = ctx.graph.vertex_count(),
            edges = ctx.graph.edge_count(),
            stops = stops.len(),
            buses = system.buses().len(),
            "built transit graph"
        );

        TransitGraph {
            graph: ctx.graph,
            edges: ctx.edges,
        }
    }

    /// Add one ride edge per (boarding stop, alighting stop) pair of a bus.
    ///
    /// For each boarding position the forward edges come first, then (for
    /// out-and-back lines) the backward ones.
    fn add_bus(&self, ctx: &mut BuildContext, bus: &Bus, stops: &[Stop]) {
        let sequence: Vec<&Stop> = bus.stops.iter().map(|id| &stops[id.0]).collect();

        for (i, &origin) in sequence.iter().enumerate() {
            let mut distance = 0.0;
            for j in (i + 1)..sequence.len() {
                distance += road_distance(sequence[j - 1], sequence[j]);
                self.add_ride(ctx, bus, origin, sequence[j], distance, j - i);
            }

            if bus.kind == BusKind::OutAndBack {
                let mut distance = 0.0;
                for j in (0..i).rev() {
                    distance += road_distance(sequence[j + 1], sequence[j]);
                    self.add_ride(ctx, bus, origin, sequence[j], distance, i - j);
                }
            }
        }
    }

    fn add_ride(
        &self,
        ctx: &mut BuildContext,
        bus: &Bus,
        from: &Stop,
        to: &Stop,
        distance: f64,
        span_count: usize,
    ) {
        let time = distance / self.velocity;
        ctx.add(
            boarding_vertex(from.id),
            arrival_vertex(to.id),
            time,
            EdgeInfo::Ride {
                bus: bus.name.clone(),
                span_count,
                time,
            },
        );
    }
}

/// Graph and metadata under construction.
struct BuildContext {
    graph: DirectedWeightedGraph,
    edges: EdgeTable,
}

impl BuildContext {
    fn add(&mut self, from: VertexId, to: VertexId, weight: f64, info: EdgeInfo) {
        let id = self.graph.add_edge(Edge { from, to, weight });
        self.edges.record(id, info);
    }
}
