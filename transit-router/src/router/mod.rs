//! Shortest-path routing over a built transit graph.
//!
//! The graph is fixed once built, so the router memoises one shortest-path
//! tree per source vertex and serves later queries from the same source
//! without searching again.

mod query;
mod tree;


pub use query::{RouteId, RouteInfo, Router};
pub use tree::ShortestPathTree;
