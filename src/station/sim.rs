/*!
`sim.rs`

In-process simulated RControlStation.

The simulator backs every `Station` operation with plain data: one
`CarState`, a route-id -> points map, a FIFO error queue, a debug level,
and canned terminal replies. It records the endpoint handed to `connect`
and can be flagged unreachable so the connect-failure path is reachable
from tests and demos.

A JSON fixture can preload the whole thing (`--fixture` on the binary):

{
  "state": { "fw_major": 12, "px": 1.5, ... },
  "routes": { "0": [ { "px": 1.0, "py": 2.0, "speed": 3.0, "time": 0 } ] },
  "errors": [ "queued message" ]
}

Unknown fixture fields are rejected; missing ones default.
*/

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{CarState, RoutePoint, Station};

/* ---- Fixture ---- */

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Fixture {
    state: CarState,
    routes: HashMap<String, Vec<RoutePoint>>,
    errors: Vec<String>,
}

/* ---- Simulator ---- */

/// Simulated station; the one `Station` implementation shipped in-crate.
#[derive(Debug, Default)]
pub struct SimStation {
    endpoint: Option<(String, u16)>,
    reachable: bool,
    state: CarState,
    routes: HashMap<i32, Vec<RoutePoint>>,
    errors: VecDeque<String>,
    debug_level: i32,
}

impl SimStation {
    pub fn new() -> Self {
        SimStation {
            reachable: true,
            ..Default::default()
        }
    }

    /// Build a simulator preloaded from a JSON fixture file.
    pub fn from_fixture_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
        let fixture: Fixture = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture JSON: {}", path.display()))?;

        let mut sim = SimStation::new();
        sim.state = fixture.state;
        for (id, points) in fixture.routes {
            let id: i32 = id
                .parse()
                .with_context(|| format!("Fixture route id is not an integer: '{id}'"))?;
            sim.routes.insert(id, points);
        }
        sim.errors = fixture.errors.into();
        Ok(sim)
    }

    /// Make subsequent `connect` calls fail, as an unreachable station would.
    pub fn set_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    /// Queue an error message for the `errors` command to drain.
    pub fn push_error(&mut self, msg: impl Into<String>) {
        self.errors.push_back(msg.into());
    }

    pub fn set_state(&mut self, state: CarState) {
        self.state = state;
    }

    pub fn endpoint(&self) -> Option<(&str, u16)> {
        self.endpoint.as_ref().map(|(h, p)| (h.as_str(), *p))
    }

    pub fn debug_level(&self) -> i32 {
        self.debug_level
    }

    pub fn route(&self, route: i32) -> Option<&[RoutePoint]> {
        self.routes.get(&route).map(|v| v.as_slice())
    }
}

impl Station for SimStation {
    fn connect(&mut self, host: &str, port: u16) -> bool {
        if !self.reachable {
            return false;
        }
        self.endpoint = Some((host.to_string(), port));
        true
    }

    fn disconnect(&mut self) {
        self.endpoint = None;
    }

    fn state(&mut self, _car: i32, _timeout_ms: i32) -> Option<CarState> {
        if self.endpoint.is_none() {
            return None;
        }
        Some(self.state.clone())
    }

    fn route_points(
        &mut self,
        _car: i32,
        route: i32,
        capacity: usize,
        _timeout_ms: i32,
    ) -> Option<Vec<RoutePoint>> {
        if self.endpoint.is_none() {
            return None;
        }
        let mut points = self.routes.get(&route).cloned().unwrap_or_default();
        points.truncate(capacity);
        Some(points)
    }

    fn add_route_points(
        &mut self,
        _car: i32,
        points: &[RoutePoint],
        replace: bool,
        _map_only: bool,
        route: i32,
        _timeout_ms: i32,
    ) -> bool {
        if self.endpoint.is_none() {
            return false;
        }
        let entry = self.routes.entry(route).or_default();
        if replace {
            entry.clear();
        }
        entry.extend_from_slice(points);
        true
    }

    fn clear_route(&mut self, _car: i32, route: i32, _timeout_ms: i32) -> bool {
        if self.endpoint.is_none() {
            return false;
        }
        self.routes.remove(&route);
        true
    }

    fn next_error(&mut self) -> Option<String> {
        self.errors.pop_front()
    }

    fn set_debug_level(&mut self, level: i32) {
        self.debug_level = level;
    }

    fn terminal_command(&mut self, car: i32, text: &str, _timeout_ms: i32) -> Option<String> {
        if self.endpoint.is_none() {
            return None;
        }
        match text.trim() {
            "ping" => Some(format!("car {car}: pong")),
            other => Some(format!("car {car}: unknown terminal command '{other}'")),
        }
    }
}

/* ---- Tests ---- */
