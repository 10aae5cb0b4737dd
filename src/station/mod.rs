//! Backend binding for the RControlStation service.
//!
//! `Station` is the capability interface the shell talks through; every
//! handler receives it as an injected `&mut dyn Station` so the dispatch
//! core can be exercised against a fake without a real network connection.
//! `CarState` and `RoutePoint` are plain value types received per request,
//! never cached between commands.
//!
//! The only implementation shipped in this crate is the in-process
//! simulator (`sim::SimStation`); a binding to the real vendor library
//! would implement the same trait.

use serde::{Deserialize, Serialize};

pub mod sim;

pub use sim::SimStation;

/* -------------------------------------------------------------------------- */
/* Value types                                                                */
/* -------------------------------------------------------------------------- */

/// Flat telemetry record for one car, as reported by the station.
///
/// Field order mirrors the wire record; `cmd::state` prints them in exactly
/// this order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarState {
    pub fw_major: i32,
    pub fw_minor: i32,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub accel: [f64; 3],
    pub gyro: [f64; 3],
    pub mag: [f64; 3],
    pub px: f64,
    pub py: f64,
    pub speed: f64,
    pub vin: f64,
    pub temp_fet: f64,
    pub mc_fault: i32,
    pub px_gps: f64,
    pub py_gps: f64,
    pub ap_goal_px: f64,
    pub ap_goal_py: f64,
    pub ap_rad: f64,
    pub ms_today: i32,
    pub ap_route_left: i32,
    pub px_uwb: f64,
    pub py_uwb: f64,
}

/// A single route waypoint: position, target speed, and a time stamp.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePoint {
    pub px: f64,
    pub py: f64,
    pub speed: f64,
    pub time: i32,
}

/* -------------------------------------------------------------------------- */
/* Capability trait                                                           */
/* -------------------------------------------------------------------------- */

/// Operations offered by an RControlStation backend.
///
/// Every call blocks until it completes or the backend's own timeout
/// elapses; the shell adds no timeout or cancellation of its own. Failures
/// are reported in-band (`false` / `None`), never panicked.
pub trait Station {
    /// Open the TCP link to the station. Returns false when the station is
    /// unreachable.
    fn connect(&mut self, host: &str, port: u16) -> bool;

    /// Drop the TCP link. Always succeeds (a dead link is already dropped).
    fn disconnect(&mut self);

    /// Request the current telemetry record for one car.
    fn state(&mut self, car: i32, timeout_ms: i32) -> Option<CarState>;

    /// Fetch up to `capacity` points of a stored route.
    fn route_points(
        &mut self,
        car: i32,
        route: i32,
        capacity: usize,
        timeout_ms: i32,
    ) -> Option<Vec<RoutePoint>>;

    /// Append or replace the points of a route.
    fn add_route_points(
        &mut self,
        car: i32,
        points: &[RoutePoint],
        replace: bool,
        map_only: bool,
        route: i32,
        timeout_ms: i32,
    ) -> bool;

    /// Remove all points of a route.
    fn clear_route(&mut self, car: i32, route: i32, timeout_ms: i32) -> bool;

    /// Drain one queued error message, oldest first.
    fn next_error(&mut self) -> Option<String>;

    /// Adjust the backend's own debug verbosity.
    fn set_debug_level(&mut self, level: i32);

    /// Forward a raw terminal command to a car and return its reply.
    fn terminal_command(&mut self, car: i32, text: &str, timeout_ms: i32) -> Option<String>;
}
