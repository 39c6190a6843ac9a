//! Bus lines.

use std::collections::BTreeSet;
use std::fmt;

use crate::geo::{geo_distance, road_distance};

use super::stop::{Stop, StopId};

/// Dense, zero-based identity of a bus line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(pub usize);

impl fmt::Debug for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusId({})", self.0)
    }
}

/// How a bus traverses its stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusKind {
    /// Runs the sequence once, then returns from the last stop to the first.
    RoundTrip,

    /// Runs the sequence forward, then back over the same stops in reverse.
    OutAndBack,
}

/// A bus line over a sequence of stops.
///
/// Stops are held by id; the metrics below take the stop arena they index
/// into.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub kind: BusKind,
    pub stops: Vec<StopId>,
}

impl Bus {
    /// Create a bus line.
    pub fn new(id: BusId, name: String, kind: BusKind, stops: Vec<StopId>) -> Self {
        Self {
            id,
            name,
            kind,
            stops,
        }
    }

    /// Number of stops visited over a full traversal.
    pub fn stop_count(&self) -> usize {
        match self.kind {
            BusKind::RoundTrip => self.stops.len(),
            BusKind::OutAndBack => (2 * self.stops.len()).saturating_sub(1),
        }
    }

    /// Number of distinct stops on the line.
    pub fn unique_stop_count(&self) -> usize {
        self.stops.iter().collect::<BTreeSet<_>>().len()
    }

    /// Great-circle length of a full traversal, in metres.
    pub fn geo_length(&self, stops: &[Stop]) -> f64 {
        let forward: f64 = self
            .stops
            .windows(2)
            .map(|pair| geo_distance(stops[pair[0].0].coordinates, stops[pair[1].0].coordinates))
            .sum();

        match self.kind {
            BusKind::RoundTrip => forward + self.closing_leg(stops, geo_between),
            BusKind::OutAndBack => forward * 2.0,
        }
    }

    /// Road length of a full traversal, in metres.
    ///
    /// Each leg is resolved in its direction of travel, so an out-and-back
    /// line can cover different distances going out and coming back.
    pub fn road_length(&self, stops: &[Stop]) -> f64 {
        let legs = self.stops.windows(2).map(|pair| (&stops[pair[0].0], &stops[pair[1].0]));

        match self.kind {
            BusKind::RoundTrip => {
                let forward: f64 = legs.map(|(from, to)| road_distance(from, to)).sum();
                forward + self.closing_leg(stops, road_distance)
            }
            BusKind::OutAndBack => legs
                .map(|(from, to)| road_distance(from, to) + road_distance(to, from))
                .sum(),
        }
    }

    /// Ratio of road length to great-circle length.
    ///
    /// Not finite when the great-circle length is zero, as for a line whose
    /// stops all share one position: infinite if the road length is
    /// positive, NaN if it is zero too.
    pub fn curvature(&self, stops: &[Stop]) -> f64 {
        self.road_length(stops) / self.geo_length(stops)
    }

    /// Length of the implicit leg from the last stop back to the first.
    fn closing_leg(&self, stops: &[Stop], distance: impl Fn(&Stop, &Stop) -> f64) -> f64 {
        match (self.stops.last(), self.stops.first()) {
            (Some(last), Some(first)) if self.stops.len() > 1 => {
                distance(&stops[last.0], &stops[first.0])
            }
            _ => 0.0,
        }
    }
}

fn geo_between(from: &Stop, to: &Stop) -> f64 {
    geo_distance(from.coordinates, to.coordinates)
}
