/*!
Command modules and the static dispatch table.

Each handler lives in the module for its concern:
  connect.rs  - connectTcp / disconnectTcp
  state.rs    - getState
  route.rs    - getRoute / addRoutePoints / clearRoute
  diag.rs     - errors / setDebugLevel / carTerminal
  meta.rs     - help / exit / q
  shared.rs   - Usage helper, strict argument parsing, constants
  format.rs   - styling for the help listing

The table below is the single registry: name, argument synopsis, summary,
and handler in one row. Dispatch order is registration order, and `exit`
and `q` share one handler.
*/

pub mod connect;
pub mod diag;
pub mod format;
pub mod meta;
pub mod route;
pub mod shared;
pub mod state;

use crate::repl::Command;

static TABLE: &[Command] = &[
    Command {
        name: meta::HELP.name,
        usage: meta::HELP.args,
        summary: "Display this message",
        run: meta::help,
    },
    Command {
        name: meta::EXIT.name,
        usage: meta::EXIT.args,
        summary: "Exit from sdvpt",
        run: meta::exit,
    },
    Command {
        name: "q",
        usage: "",
        summary: "Alias for exit",
        run: meta::exit,
    },
    Command {
        name: connect::CONNECT_TCP.name,
        usage: connect::CONNECT_TCP.args,
        summary: "Connect to RControlStation",
        run: connect::connect_tcp,
    },
    Command {
        name: connect::DISCONNECT_TCP.name,
        usage: connect::DISCONNECT_TCP.args,
        summary: "Disconnect from RControlStation",
        run: connect::disconnect_tcp,
    },
    Command {
        name: state::GET_STATE.name,
        usage: state::GET_STATE.args,
        summary: "Get state from car",
        run: state::get_state,
    },
    Command {
        name: route::GET_ROUTE.name,
        usage: route::GET_ROUTE.args,
        summary: "Print the points of a stored route",
        run: route::get_route,
    },
    Command {
        name: route::ADD_ROUTE_POINTS.name,
        usage: route::ADD_ROUTE_POINTS.args,
        summary: "Upload route points from input lines",
        run: route::add_route_points,
    },
    Command {
        name: route::CLEAR_ROUTE.name,
        usage: route::CLEAR_ROUTE.args,
        summary: "Clear a stored route",
        run: route::clear_route,
    },
    Command {
        name: diag::ERRORS.name,
        usage: diag::ERRORS.args,
        summary: "Drain and print queued backend errors",
        run: diag::errors,
    },
    Command {
        name: diag::SET_DEBUG_LEVEL.name,
        usage: diag::SET_DEBUG_LEVEL.args,
        summary: "Set backend debug level",
        run: diag::set_debug_level,
    },
    Command {
        name: diag::CAR_TERMINAL.name,
        usage: diag::CAR_TERMINAL.args,
        summary: "Forward terminal commands to the car",
        run: diag::car_terminal,
    },
];

/// The command table, in dispatch order.
pub fn table() -> &'static [Command] {
    TABLE
}

/* ---- Tests ---- */
