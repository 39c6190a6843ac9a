//! Configuration: routing parameters and server settings.

use std::net::SocketAddr;

use serde::Deserialize;
use tracing::warn;

/// Environment variable holding the HTTP bind address.
pub const ADDR_ENV: &str = "TRANSIT_ROUTER_ADDR";

/// Parameters applied to every bus when the graph is built.
///
/// Values are in the units of the request document.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before boarding any bus.
    pub bus_wait_time: f64,

    /// Bus speed in km/h.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create settings with the given wait time (minutes) and speed (km/h).
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    /// Bus speed in metres per minute, the unit road distances and wait
    /// times combine in.
    pub fn velocity_m_per_min(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    ///
    /// An unset or unparsable address falls back to the default.
    pub fn from_env() -> Self {
        match std::env::var(ADDR_ENV) {
            Ok(value) => Self::from_addr_str(&value),
            Err(_) => Self::default(),
        }
    }

    fn from_addr_str(value: &str) -> Self {
        match value.parse() {
            Ok(addr) => Self { addr },
            Err(e) => {
                warn!(value, error = %e, "ignoring invalid {ADDR_ENV}");
                Self::default()
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}
