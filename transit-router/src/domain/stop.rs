//! Bus stops.

use std::collections::HashMap;
use std::fmt;

use crate::geo::Coordinates;

/// Dense, zero-based identity of a stop.
///
/// Assigned when the stop is first referenced and never changes, even when
/// the stop is later re-declared with new coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

/// A named stop with coordinates and declared road distances.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinates: Coordinates,

    /// Road distance in metres to other stops, keyed by their name.
    /// Only covers travel *from* this stop.
    pub road_distances: HashMap<String, f64>,
}

impl Stop {
    /// Create a stop.
    pub fn new(
        id: StopId,
        name: String,
        coordinates: Coordinates,
        road_distances: HashMap<String, f64>,
    ) -> Self {
        Self {
            id,
            name,
            coordinates,
            road_distances,
        }
    }

    /// Create a placeholder for a stop referenced before it was declared.
    ///
    /// Placeholders sit at (0, 0) and declare no distances.
    pub fn placeholder(id: StopId, name: String) -> Self {
        Self::new(id, name, Coordinates::default(), HashMap::new())
    }
}
