//! The transport system: an arena of stops and buses.

use std::collections::{BTreeSet, HashMap};

use crate::geo::Coordinates;

use super::bus::{Bus, BusId, BusKind};
use super::stop::{Stop, StopId};

/// Read-only metrics of a bus line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: f64,
    pub curvature: f64,
}

/// Stops and buses, stored in dense append-only vectors indexed by id.
///
/// Cross references (bus to stops, stop to buses) are ids into these
/// vectors. Names are unique keys: declaring an existing name updates the
/// entry in place and keeps its id.
#[derive(Debug, Default)]
pub struct TransportSystem {
    stops: Vec<Stop>,
    stop_ids: HashMap<String, StopId>,

    buses: Vec<Bus>,
    bus_ids: HashMap<String, BusId>,

    /// Buses serving each stop, indexed by stop id.
    stop_buses: Vec<BTreeSet<BusId>>,
}

impl TransportSystem {
    /// Create an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a stop, or update the one already known under this name.
    ///
    /// Re-declaring replaces coordinates and road distances but keeps the id,
    /// so buses already referencing the stop see the new data.
    pub fn add_stop(
        &mut self,
        name: &str,
        coordinates: Coordinates,
        road_distances: HashMap<String, f64>,
    ) -> StopId {
        let id = self.stop_id_or_insert(name);
        let stop = &mut self.stops[id.0];
        stop.coordinates = coordinates;
        stop.road_distances = road_distances;
        id
    }

    /// Return the id of a stop, creating a placeholder if it is unknown.
    pub fn add_placeholder_stop(&mut self, name: &str) -> StopId {
        self.stop_id_or_insert(name)
    }

    fn stop_id_or_insert(&mut self, name: &str) -> StopId {
        if let Some(id) = self.stop_ids.get(name) {
            return *id;
        }

        let id = StopId(self.stops.len());
        self.stops.push(Stop::placeholder(id, name.to_string()));
        self.stop_buses.push(BTreeSet::new());
        self.stop_ids.insert(name.to_string(), id);
        id
    }

    /// Declare a bus line over the named stops.
    ///
    /// Stops not yet declared are created as placeholders. Declaring a bus
    /// name twice replaces the earlier line's kind and stops but keeps its id.
    pub fn add_bus<S: AsRef<str>>(&mut self, name: &str, kind: BusKind, stop_names: &[S]) -> BusId {
        let stops: Vec<StopId> = stop_names
            .iter()
            .map(|stop_name| self.add_placeholder_stop(stop_name.as_ref()))
            .collect();

        let existing = self.bus_ids.get(name).copied();
        let id = match existing {
            Some(id) => {
                for stop in &self.buses[id.0].stops {
                    self.stop_buses[stop.0].remove(&id);
                }
                self.buses[id.0] = Bus::new(id, name.to_string(), kind, stops);
                id
            }
            None => {
                let id = BusId(self.buses.len());
                self.buses.push(Bus::new(id, name.to_string(), kind, stops));
                self.bus_ids.insert(name.to_string(), id);
                id
            }
        };

        for stop in &self.buses[id.0].stops {
            self.stop_buses[stop.0].insert(id);
        }
        id
    }

    /// Declare a round-trip bus line.
    pub fn add_round_trip_bus<S: AsRef<str>>(&mut self, name: &str, stop_names: &[S]) -> BusId {
        self.add_bus(name, BusKind::RoundTrip, stop_names)
    }

    /// Declare an out-and-back bus line.
    pub fn add_out_and_back_bus<S: AsRef<str>>(&mut self, name: &str, stop_names: &[S]) -> BusId {
        self.add_bus(name, BusKind::OutAndBack, stop_names)
    }

    /// All stops, indexed by id.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses, indexed by id.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.0)
    }

    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stop_ids.get(name).map(|id| &self.stops[id.0])
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.0)
    }

    pub fn bus_by_name(&self, name: &str) -> Option<&Bus> {
        self.bus_ids.get(name).map(|id| &self.buses[id.0])
    }

    /// Sorted names of the buses serving a stop.
    ///
    /// Returns `None` if the stop is unknown, and an empty list if it is
    /// known but no bus calls there.
    pub fn buses_serving(&self, stop_name: &str) -> Option<Vec<&str>> {
        let id = self.stop_ids.get(stop_name)?;
        let names: BTreeSet<&str> = self.stop_buses[id.0]
            .iter()
            .map(|bus| self.buses[bus.0].name.as_str())
            .collect();
        Some(names.into_iter().collect())
    }

    /// Metrics of the named bus, or `None` if it is unknown.
    pub fn bus_stats(&self, name: &str) -> Option<BusStats> {
        let bus = self.bus_by_name(name)?;
        Some(BusStats {
            stop_count: bus.stop_count(),
            unique_stop_count: bus.unique_stop_count(),
            route_length: bus.road_length(&self.stops),
            curvature: bus.curvature(&self.stops),
        })
    }
}
