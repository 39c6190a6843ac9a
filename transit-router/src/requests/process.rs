//! Applying base requests and answering stat requests.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::domain::{BusKind, TransportSystem};
use crate::geo::Coordinates;
use crate::graph::arrival_vertex;
use crate::network::TransitNetwork;
use crate::router::Router;

use super::dto::*;
use super::error::RequestError;

/// Parse and validate a request document.
pub fn load_document<R: Read>(reader: R) -> Result<Document, RequestError> {
    let document: Document = serde_json::from_reader(reader)?;
    validate_document(&document)?;
    Ok(document)
}

/// Parse a request document from a file.
pub fn load_document_file(path: impl AsRef<Path>) -> Result<Document, RequestError> {
    let file = File::open(path)?;
    load_document(BufReader::new(file))
}

/// Check the values the graph turns into edge weights.
///
/// Every edge weight must be non-negative, so road distances and the wait
/// time may not be negative and buses must have a positive speed.
pub fn validate_document(document: &Document) -> Result<(), RequestError> {
    let settings = &document.routing_settings;
    if !(settings.bus_wait_time.is_finite() && settings.bus_wait_time >= 0.0) {
        return Err(RequestError::InvalidWaitTime(settings.bus_wait_time));
    }
    if !(settings.bus_velocity.is_finite() && settings.bus_velocity > 0.0) {
        return Err(RequestError::InvalidVelocity(settings.bus_velocity));
    }

    for request in &document.base_requests {
        let BaseRequest::Stop(stop) = request else {
            continue;
        };
        for (to, &distance) in &stop.road_distances {
            if !(distance.is_finite() && distance >= 0.0) {
                return Err(RequestError::InvalidDistance {
                    from: stop.name.clone(),
                    to: to.clone(),
                    distance,
                });
            }
        }
    }
    Ok(())
}

/// Declare the stops and buses of `requests` in order.
pub fn apply_base_requests(system: &mut TransportSystem, requests: &[BaseRequest]) {
    for request in requests {
        match request {
            BaseRequest::Stop(stop) => {
                system.add_stop(
                    &stop.name,
                    Coordinates::new(stop.latitude, stop.longitude),
                    stop.road_distances.clone(),
                );
            }
            BaseRequest::Bus(bus) => {
                let kind = if bus.is_roundtrip {
                    BusKind::RoundTrip
                } else {
                    BusKind::OutAndBack
                };
                system.add_bus(&bus.name, kind, &bus.stops);
            }
        }
    }

    debug!(
        stops = system.stops().len(),
        buses = system.buses().len(),
        "applied base requests"
    );
}

/// Answer one stat request.
///
/// Route edges are read back from `router` and released before returning.
pub fn answer(network: &TransitNetwork, router: &Router, request: &StatRequest) -> StatResponse {
    let id = request.id();
    let response = match request {
        StatRequest::Bus { name, .. } => network
            .system()
            .bus_stats(name)
            .map(|stats| StatResponse::Bus(BusStatsResponse::from_stats(id, &stats))),
        StatRequest::Stop { name, .. } => network.system().buses_serving(name).map(|buses| {
            StatResponse::Stop(StopBusesResponse {
                request_id: id,
                buses: buses.into_iter().map(String::from).collect(),
            })
        }),
        StatRequest::Route { from, to, .. } => answer_route(network, router, id, from, to),
    };
    response.unwrap_or_else(|| StatResponse::NotFound(NotFoundResponse::new(id)))
}

fn answer_route(
    network: &TransitNetwork,
    router: &Router,
    request_id: i64,
    from: &str,
    to: &str,
) -> Option<StatResponse> {
    let system = network.system();
    let from = system.stop_by_name(from)?.id;
    let to = system.stop_by_name(to)?.id;

    let info = router.build_route(arrival_vertex(from), arrival_vertex(to))?;
    let items = (0..info.edge_count)
        .map(|index| {
            let edge = router.route_edge(info.id, index);
            RouteItem::from_edge(network.graph().edge_info(edge))
        })
        .collect();
    router.release_route(info.id);

    Some(StatResponse::Route(RouteResponse {
        request_id,
        total_time: info.weight,
        items,
    }))
}

/// Answer stat requests in order.
pub fn answer_stat_requests(
    network: &TransitNetwork,
    router: &Router,
    requests: &[StatRequest],
) -> Vec<StatResponse> {
    requests
        .iter()
        .map(|request| answer(network, router, request))
        .collect()
}

/// Build the document's network and answer its stat requests.
pub fn process_document(document: &Document) -> Result<Vec<StatResponse>, RequestError> {
    let network = TransitNetwork::from_document(document)?;
    let router = network.router();
    Ok(answer_stat_requests(&network, &router, &document.stat_requests))
}

/// Write responses as a JSON array followed by a newline.
pub fn write_responses<W: Write>(writer: W, responses: &[StatResponse]) -> Result<(), RequestError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, responses)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// The two-line sample network with a Stop, Bus and Route query each.
    fn sample() -> serde_json::Value {
        json!({
            "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
            "base_requests": [
                {"type": "Bus", "name": "297", "is_roundtrip": true,
                 "stops": ["Biryulyovo Zapadnoye", "Biryulyovo Tovarnaya",
                           "Universam", "Biryulyovo Zapadnoye"]},
                {"type": "Bus", "name": "635", "is_roundtrip": false,
                 "stops": ["Biryulyovo Tovarnaya", "Universam", "Prazhskaya"]},
                {"type": "Stop", "name": "Biryulyovo Zapadnoye",
                 "latitude": 55.574371, "longitude": 37.6517,
                 "road_distances": {"Biryulyovo Tovarnaya": 2600}},
                {"type": "Stop", "name": "Biryulyovo Tovarnaya",
                 "latitude": 55.592028, "longitude": 37.653656,
                 "road_distances": {"Universam": 890}},
                {"type": "Stop", "name": "Universam",
                 "latitude": 55.587655, "longitude": 37.645687,
                 "road_distances": {"Biryulyovo Zapadnoye": 2500,
                                    "Biryulyovo Tovarnaya": 1380,
                                    "Prazhskaya": 4650}},
                {"type": "Stop", "name": "Prazhskaya",
                 "latitude": 55.611717, "longitude": 37.603938,
                 "road_distances": {}},
                {"type": "Stop", "name": "Lonely",
                 "latitude": 55.6, "longitude": 37.6}
            ],
            "stat_requests": [
                {"id": 1, "type": "Bus", "name": "297"},
                {"id": 2, "type": "Bus", "name": "999"},
                {"id": 3, "type": "Stop", "name": "Universam"},
                {"id": 4, "type": "Stop", "name": "Lonely"},
                {"id": 5, "type": "Stop", "name": "Nowhere"},
                {"id": 6, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Universam"},
                {"id": 7, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Prazhskaya"},
                {"id": 8, "type": "Route", "from": "Universam", "to": "Lonely"},
                {"id": 9, "type": "Route", "from": "Universam", "to": "Nowhere"},
                {"id": 10, "type": "Route", "from": "Prazhskaya", "to": "Prazhskaya"}
            ]
        })
    }

    fn sample_document() -> Document {
        serde_json::from_value(sample()).unwrap()
    }

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn bus_and_stop_queries() {
        let responses = process_document(&sample_document()).unwrap();
        assert_eq!(responses.len(), 10);

        match &responses[0] {
            StatResponse::Bus(bus) => {
                assert_eq!(bus.request_id, 1);
                assert_eq!(bus.stop_count, 4);
                assert_eq!(bus.unique_stop_count, 3);
                assert_eq!(bus.route_length, 5990.0);
                assert!(bus.curvature > 1.0);
            }
            other => panic!("expected bus stats, got {other:?}"),
        }
        assert_eq!(responses[1], StatResponse::NotFound(NotFoundResponse::new(2)));
        assert_eq!(
            responses[2],
            StatResponse::Stop(StopBusesResponse {
                request_id: 3,
                buses: vec!["297".into(), "635".into()],
            })
        );
        assert_eq!(
            responses[3],
            StatResponse::Stop(StopBusesResponse {
                request_id: 4,
                buses: vec![],
            })
        );
        assert_eq!(responses[4], StatResponse::NotFound(NotFoundResponse::new(5)));
    }

    #[test]
    fn route_queries() {
        let responses = process_document(&sample_document()).unwrap();
        // 40 km/h is 2000/3 m/min
        let minutes = |metres: f64| metres * 3.0 / 2000.0;

        match &responses[5] {
            StatResponse::Route(route) => {
                assert_eq!(route.request_id, 6);
                assert!(approx(route.total_time, 6.0 + minutes(2600.0 + 890.0)));
                match route.items.as_slice() {
                    [
                        RouteItem::Wait { stop_name, time },
                        RouteItem::Ride {
                            bus,
                            span_count,
                            time: ride_time,
                        },
                    ] => {
                        assert_eq!(stop_name, "Biryulyovo Zapadnoye");
                        assert_eq!(*time, 6.0);
                        assert_eq!(bus, "297");
                        assert_eq!(*span_count, 2);
                        assert!(approx(*ride_time, minutes(2600.0 + 890.0)));
                    }
                    items => panic!("expected wait then ride, got {items:?}"),
                }
            }
            other => panic!("expected route, got {other:?}"),
        }

        match &responses[6] {
            StatResponse::Route(route) => {
                let expected = 6.0 + minutes(3490.0) + 6.0 + minutes(4650.0);
                assert!(approx(route.total_time, expected));
                let buses: Vec<&str> = route
                    .items
                    .iter()
                    .filter_map(|item| match item {
                        RouteItem::Ride { bus, .. } => Some(bus.as_str()),
                        RouteItem::Wait { .. } => None,
                    })
                    .collect();
                assert_eq!(buses, vec!["297", "635"]);
            }
            other => panic!("expected route, got {other:?}"),
        }

        assert_eq!(responses[7], StatResponse::NotFound(NotFoundResponse::new(8)));
        assert_eq!(responses[8], StatResponse::NotFound(NotFoundResponse::new(9)));
        assert_eq!(
            responses[9],
            StatResponse::Route(RouteResponse {
                request_id: 10,
                total_time: 0.0,
                items: vec![],
            })
        );
    }

    #[test]
    fn routes_are_released_after_answering() {
        let document = sample_document();
        let network = TransitNetwork::from_document(&document).unwrap();
        let router = network.router();

        answer_stat_requests(&network, &router, &document.stat_requests);
        assert_eq!(router.live_routes(), 0);
        assert!(router.cached_sources() > 0);
    }

    #[test]
    fn load_from_file_and_write() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, &sample()).unwrap();

        let document = load_document_file(file.path()).unwrap();
        assert_eq!(document.stat_requests.len(), 10);

        let mut out = Vec::new();
        write_responses(&mut out, &process_document(&document).unwrap()).unwrap();
        let written: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(written.as_array().map(Vec::len), Some(10));
        assert_eq!(written[4], json!({"request_id": 5, "error_message": "not found"}));
    }

    #[test]
    fn malformed_input() {
        let err = load_document("{\"base_requests\": 3}".as_bytes()).unwrap_err();
        assert!(matches!(err, RequestError::Json(_)));

        let err = load_document_file("/nonexistent/transit-router/input.json").unwrap_err();
        assert!(matches!(err, RequestError::Io(_)));
    }

    /// Out-and-back line between two stops with the given distances both ways.
    fn two_stop_document(settings: serde_json::Value, distance: f64) -> serde_json::Value {
        json!({
            "routing_settings": settings,
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 55.0, "longitude": 37.0,
                 "road_distances": {"B": distance}},
                {"type": "Stop", "name": "B", "latitude": 55.0, "longitude": 37.0,
                 "road_distances": {"A": distance}},
                {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": false}
            ],
            "stat_requests": [
                {"id": 1, "type": "Route", "from": "A", "to": "B"}
            ]
        })
    }

    fn settings(wait: f64, velocity: f64) -> serde_json::Value {
        json!({"bus_wait_time": wait, "bus_velocity": velocity})
    }

    #[test]
    fn negative_distance_rejected_before_routing() {
        let value = two_stop_document(settings(6.0, 40.0), -10000.0);
        let document: Document = serde_json::from_value(value.clone()).unwrap();

        // A negative cycle between A and B would otherwise reach Dijkstra
        match process_document(&document) {
            Err(RequestError::InvalidDistance { distance, .. }) => {
                assert_eq!(distance, -10000.0)
            }
            other => panic!("expected invalid distance, got {other:?}"),
        }
        assert!(TransitNetwork::from_document(&document).is_err());

        let err = load_document(value.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, RequestError::InvalidDistance { .. }));
    }

    #[test]
    fn invalid_routing_settings_rejected() {
        for velocity in [0.0, -40.0] {
            let document: Document =
                serde_json::from_value(two_stop_document(settings(6.0, velocity), 100.0)).unwrap();
            assert!(matches!(
                process_document(&document),
                Err(RequestError::InvalidVelocity(v)) if v == velocity
            ));
        }

        let document: Document =
            serde_json::from_value(two_stop_document(settings(-1.0, 40.0), 100.0)).unwrap();
        assert!(matches!(
            validate_document(&document),
            Err(RequestError::InvalidWaitTime(_))
        ));
    }

    #[test]
    fn zero_wait_and_distance_accepted() {
        let document: Document =
            serde_json::from_value(two_stop_document(settings(0.0, 60.0), 0.0)).unwrap();
        let responses = process_document(&document).unwrap();
        assert_eq!(
            responses,
            vec![StatResponse::Route(RouteResponse {
                request_id: 1,
                total_time: 0.0,
                items: vec![
                    RouteItem::Wait {
                        stop_name: "A".into(),
                        time: 0.0
                    },
                    RouteItem::Ride {
                        bus: "1".into(),
                        span_count: 1,
                        time: 0.0
                    },
                ],
            })]
        );
    }
}
