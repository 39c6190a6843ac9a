//! A transport system frozen together with its routing graph.

use crate::config::RoutingSettings;
use crate::domain::TransportSystem;
use crate::graph::{GraphBuilder, TransitGraph};
use crate::requests::{Document, RequestError, apply_base_requests, validate_document};
use crate::router::Router;

/// Stops, buses and the graph built from them.
///
/// The system cannot be modified once the graph is built, so the two never
/// disagree. Rebuilding means constructing a new network.
#[derive(Debug)]
pub struct TransitNetwork {
    system: TransportSystem,
    settings: RoutingSettings,
    graph: TransitGraph,
}

impl TransitNetwork {
    /// Build the graph for `system` under `settings`.
    pub fn build(system: TransportSystem, settings: RoutingSettings) -> Self {
        let graph = GraphBuilder::from_settings(&settings).build(&system);
        Self {
            system,
            settings,
            graph,
        }
    }

    /// Validate a document, apply its base requests and build the graph.
    ///
    /// Stat requests in the document are ignored.
    pub fn from_document(document: &Document) -> Result<Self, RequestError> {
        validate_document(document)?;
        let mut system = TransportSystem::new();
        apply_base_requests(&mut system, &document.base_requests);
        Ok(Self::build(system, document.routing_settings))
    }

    pub fn system(&self) -> &TransportSystem {
        &self.system
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    /// A fresh router over this network's graph.
    pub fn router(&self) -> Router<'_> {
        Router::new(self.graph.graph())
    }
}
