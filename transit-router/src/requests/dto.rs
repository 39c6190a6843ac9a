//! Data transfer objects for request documents and their responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::RoutingSettings;
use crate::domain::BusStats;
use crate::graph::EdgeInfo;

/// A complete request document.
#[derive(Debug, Default, Deserialize)]
pub struct Document {
    pub routing_settings: RoutingSettings,

    /// Stop and bus declarations, applied in order
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    /// Queries, answered in order once the graph is built
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// A declaration that modifies the network.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopDeclaration),
    Bus(BusDeclaration),
}

/// Declares a stop at a position, with road distances to its neighbours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopDeclaration {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Road distance in metres from this stop to the named stop
    #[serde(default)]
    pub road_distances: HashMap<String, f64>,
}

/// Declares a bus line over named stops.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusDeclaration {
    pub name: String,
    pub stops: Vec<String>,

    /// Round trips run only in the listed order; otherwise the bus also runs
    /// back along the same stops
    pub is_roundtrip: bool,
}

/// A query against the built network.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    /// The caller-chosen id echoed back in the response.
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. } => *id,
        }
    }
}

/// Answer to one stat request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus(BusStatsResponse),
    Stop(StopBusesResponse),
    Route(RouteResponse),
    NotFound(NotFoundResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusStatsResponse {
    pub request_id: i64,
    pub stop_count: usize,
    pub unique_stop_count: usize,

    /// Road length in metres
    pub route_length: f64,

    /// Road length over geographic length; `null` when not finite
    pub curvature: f64,
}

impl BusStatsResponse {
    pub fn from_stats(request_id: i64, stats: &BusStats) -> Self {
        Self {
            request_id,
            stop_count: stats.stop_count,
            unique_stop_count: stats.unique_stop_count,
            route_length: stats.route_length,
            curvature: stats.curvature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopBusesResponse {
    pub request_id: i64,

    /// Sorted bus names
    pub buses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub request_id: i64,

    /// Minutes from arriving at the origin to arriving at the destination
    pub total_time: f64,

    pub items: Vec<RouteItem>,
}

/// One step of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    #[serde(rename = "Bus")]
    Ride {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl RouteItem {
    pub fn from_edge(info: &EdgeInfo) -> Self {
        match info {
            EdgeInfo::Wait { stop_name, time } => RouteItem::Wait {
                stop_name: stop_name.clone(),
                time: *time,
            },
            EdgeInfo::Ride {
                bus,
                span_count,
                time,
            } => RouteItem::Ride {
                bus: bus.clone(),
                span_count: *span_count,
                time: *time,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotFoundResponse {
    pub request_id: i64,
    pub error_message: String,
}

impl NotFoundResponse {
    pub fn new(request_id: i64) -> Self {
        Self {
            request_id,
            error_message: "not found".to_string(),
        }
    }
}
