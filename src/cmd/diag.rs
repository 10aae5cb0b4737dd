/*!
`diag.rs`

Diagnostic commands: `errors`, `setDebugLevel`, `carTerminal`.

`carTerminal` is a nested interactive mode: the main loop hands the input
stream over until the operator types a line starting with `exit` (the
original tool only ever compared the first four characters, and that loose
check is kept) or the input ends. Everything else is forwarded verbatim to
car 0's terminal and the reply printed. Best-effort passthrough; the
feature was flaky in the original and this rendition does not harden it.
*/

use std::io::Write;

use anyhow::Result;

use crate::repl::{Ctx, Flow};

use super::shared::{DEFAULT_TIMEOUT_MS, Usage};

pub const ERRORS: Usage = Usage {
    name: "errors",
    args: "",
};

pub const SET_DEBUG_LEVEL: Usage = Usage {
    name: "setDebugLevel",
    args: "<level>",
};

pub const CAR_TERMINAL: Usage = Usage {
    name: "carTerminal",
    args: "",
};

/// Drain the backend error queue, one message per line.
pub fn errors(ctx: &mut Ctx, _tokens: &[&str]) -> Result<Flow> {
    let mut drained = 0u32;
    while let Some(msg) = ctx.station.next_error() {
        writeln!(ctx.out, "{msg}")?;
        drained += 1;
    }
    if drained == 0 {
        writeln!(ctx.out, "No errors!")?;
    }
    Ok(Flow::Continue)
}

/// Forward a debug level to the backend. No feedback on success.
pub fn set_debug_level(ctx: &mut Ctx, tokens: &[&str]) -> Result<Flow> {
    if tokens.len() != 2 {
        return SET_DEBUG_LEVEL.wrong_count(ctx);
    }
    let Some(level) = SET_DEBUG_LEVEL.parse_i32(ctx, tokens[1])? else {
        return Ok(Flow::Continue);
    };
    ctx.station.set_debug_level(level);
    Ok(Flow::Continue)
}

/// Nested terminal passthrough mode for car 0.
pub fn car_terminal(ctx: &mut Ctx, _tokens: &[&str]) -> Result<Flow> {
    loop {
        write!(ctx.out, "terminal> ")?;
        ctx.out.flush()?;

        let mut line = String::new();
        if ctx.input.read_line(&mut line)? == 0 {
            writeln!(ctx.out)?;
            break;
        }
        // Loose historical check: only the first four characters matter.
        if line.starts_with("exit") {
            break;
        }
        let text = line.trim_end_matches(['\r', '\n']);
        match ctx.station.terminal_command(0, text, DEFAULT_TIMEOUT_MS) {
            Some(reply) => writeln!(ctx.out, "{reply}")?,
            None => writeln!(ctx.out, "Fail!")?,
        }
    }
    Ok(Flow::Continue)
}

/* ---- Tests ---- */

#[cfg(test)]
mod tests {
    use crate::repl::Flow;
    use crate::repl::testing::exec_line;
    use crate::station::{SimStation, Station as _};

    #[test]
    fn errors_empty_queue() {
        let mut sim = SimStation::new();
        let (flow, out) = exec_line(&mut sim, "", "errors");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, "No errors!\n");
    }

    #[test]
    fn errors_drains_in_order() {
        let mut sim = SimStation::new();
        sim.push_error("first failure");
        sim.push_error("second failure");
        let (_, out) = exec_line(&mut sim, "", "errors");
        assert_eq!(out, "first failure\nsecond failure\n");

        // Queue is now empty again.
        let (_, out) = exec_line(&mut sim, "", "errors");
        assert_eq!(out, "No errors!\n");
    }

    #[test]
    fn set_debug_level_forwards_silently() {
        let mut sim = SimStation::new();
        let (_, out) = exec_line(&mut sim, "", "setDebugLevel 3");
        assert!(out.is_empty());
        assert_eq!(sim.debug_level(), 3);
    }

    #[test]
    fn set_debug_level_rejects_garbage() {
        let mut sim = SimStation::new();
        let (_, out) = exec_line(&mut sim, "", "setDebugLevel high");
        assert!(out.starts_with("Invalid number: 'high'"));
        assert_eq!(sim.debug_level(), 0);
    }

    #[test]
    fn car_terminal_forwards_until_exit() {
        let mut sim = SimStation::new();
        sim.connect("localhost", 65191);
        let (flow, out) = exec_line(&mut sim, "ping\nexit\n", "carTerminal");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("car 0: pong"));
    }

    #[test]
    fn car_terminal_exit_prefix_is_enough() {
        let mut sim = SimStation::new();
        sim.connect("localhost", 65191);
        // "exitnow" matches on its first four characters; nothing is forwarded.
        let (flow, out) = exec_line(&mut sim, "exitnow\n", "carTerminal");
        assert_eq!(flow, Flow::Continue);
        assert!(!out.contains("car 0"));
    }

    #[test]
    fn car_terminal_stops_on_eof() {
        let mut sim = SimStation::new();
        sim.connect("localhost", 65191);
        let (flow, _) = exec_line(&mut sim, "", "carTerminal");
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn car_terminal_reports_backend_failure() {
        let mut sim = SimStation::new(); // never connected
        let (_, out) = exec_line(&mut sim, "ping\nexit\n", "carTerminal");
        assert!(out.contains("Fail!"));
    }
}
