//! Domain model of the bus network.
//!
//! Stops and buses live in dense vectors owned by [`TransportSystem`] and
//! refer to each other by id. Lookups by name return `Option`, since an
//! unknown name is an ordinary query outcome rather than an error.

mod bus;
mod stop;
mod system;

pub use bus::{Bus, BusId, BusKind};
pub use stop::{Stop, StopId};
pub use system::{BusStats, TransportSystem};
