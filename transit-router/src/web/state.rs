//! Application state for the web layer.

use std::sync::Arc;

use crate::network::TransitNetwork;
use crate::router::Router;

/// Shared application state.
///
/// The network is built once at startup and lives until the process exits;
/// the router's caches are shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Preloaded stops, buses and graph
    pub network: &'static TransitNetwork,

    /// Router over the network's graph
    pub router: Arc<Router<'static>>,
}

impl AppState {
    /// Create a new app state with a fresh router over `network`.
    ///
    /// The network must outlive the server; the binary leaks the one it
    /// loads at startup.
    pub fn new(network: &'static TransitNetwork) -> Self {
        Self {
            network,
            router: Arc::new(network.router()),
        }
    }
}
