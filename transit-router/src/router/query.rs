//! Point-to-point route queries over a fixed graph.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::graph::{DirectedWeightedGraph, EdgeId, VertexId};

use super::tree::ShortestPathTree;

/// Handle of a route built by a [`Router`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub u64);

/// Summary of a built route. Its edges are read through
/// [`Router::route_edge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteInfo {
    pub id: RouteId,

    /// Total weight of the route.
    pub weight: f64,

    /// Number of edges on the route.
    pub edge_count: usize,
}

/// Answers shortest-path queries against a graph it borrows.
///
/// One shortest-path tree is computed per distinct source vertex and kept
/// for the router's lifetime, so the cache is bounded by the vertex count.
/// Built routes keep their edge list until released.
///
/// Queries take `&self`; the caches sit behind mutexes so a router can be
/// shared between threads. Two threads asking for the same uncached source
/// may both compute its tree; the first one stored is kept, and both are
/// identical.
#[derive(Debug)]
pub struct Router<'g> {
    graph: &'g DirectedWeightedGraph,
    trees: Mutex<HashMap<VertexId, Arc<ShortestPathTree>>>,
    routes: Mutex<HashMap<RouteId, Vec<EdgeId>>>,
    next_route_id: AtomicU64,
}

impl<'g> Router<'g> {
    pub fn new(graph: &'g DirectedWeightedGraph) -> Self {
        Self {
            graph,
            trees: Mutex::new(HashMap::new()),
            routes: Mutex::new(HashMap::new()),
            next_route_id: AtomicU64::new(0),
        }
    }

    pub fn graph(&self) -> &'g DirectedWeightedGraph {
        self.graph
    }

    /// Find the cheapest route from `from` to `to`.
    ///
    /// Returns `None` if `to` cannot be reached. A route from a vertex to
    /// itself has zero weight and no edges.
    ///
    /// # Panics
    ///
    /// Panics if either vertex is outside the graph.
    pub fn build_route(&self, from: VertexId, to: VertexId) -> Option<RouteInfo> {
        assert!(
            to.0 < self.graph.vertex_count(),
            "target {to:?} outside graph of {} vertices",
            self.graph.vertex_count()
        );

        let tree = self.tree(from);
        let weight = tree.distance_to(to)?;
        let edges = tree.path_to(self.graph, to)?;

        let id = RouteId(self.next_route_id.fetch_add(1, Ordering::Relaxed));
        let info = RouteInfo {
            id,
            weight,
            edge_count: edges.len(),
        };
        lock(&self.routes).insert(id, edges);
        Some(info)
    }

    /// The `index`-th edge of a built route, in travel order.
    ///
    /// # Panics
    ///
    /// Panics if the route was released or never built by this router, or if
    /// `index` is not below the route's edge count.
    pub fn route_edge(&self, route: RouteId, index: usize) -> EdgeId {
        let routes = lock(&self.routes);
        let edges = routes
            .get(&route)
            .unwrap_or_else(|| panic!("unknown or released route {route:?}"));
        assert!(
            index < edges.len(),
            "edge index {index} out of range for route {route:?} with {} edges",
            edges.len()
        );
        edges[index]
    }

    /// All edges of a built route, in travel order.
    ///
    /// # Panics
    ///
    /// Panics if the route was released or never built by this router.
    pub fn route_edges(&self, route: RouteId) -> Vec<EdgeId> {
        lock(&self.routes)
            .get(&route)
            .cloned()
            .unwrap_or_else(|| panic!("unknown or released route {route:?}"))
    }

    /// Drop the edge list of a route. Returns whether the route was held.
    pub fn release_route(&self, route: RouteId) -> bool {
        lock(&self.routes).remove(&route).is_some()
    }

    /// Number of routes built and not yet released.
    pub fn live_routes(&self) -> usize {
        lock(&self.routes).len()
    }

    /// Number of source vertices with a cached shortest-path tree.
    pub fn cached_sources(&self) -> usize {
        lock(&self.trees).len()
    }

    fn tree(&self, source: VertexId) -> Arc<ShortestPathTree> {
        if let Some(tree) = lock(&self.trees).get(&source) {
            return Arc::clone(tree);
        }

        // Computed without holding the lock so other sources are not blocked
        let computed = Arc::new(ShortestPathTree::compute(self.graph, source));
        trace!(
            source = source.0,
            reachable = computed.reachable_count(),
            "computed shortest-path tree"
        );

        Arc::clone(lock(&self.trees).entry(source).or_insert(computed))
    }
}

/// Lock a cache, ignoring poisoning: every cache write is a single insert
/// or remove, so a panicking holder cannot leave it half-updated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
