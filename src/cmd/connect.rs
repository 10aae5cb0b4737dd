/*!
`connect.rs`

`connectTcp` and `disconnectTcp`: the only two handlers that touch the
session. A successful connect records the endpoint and turns the prompt
into `"<host>:<port>> "`; a failed connect leaves the prompt alone.
Disconnect resets both unconditionally, whatever the prior link state.
*/

use std::io::Write;
use std::time::Instant;

use anyhow::Result;

use crate::log_debug;
use crate::repl::{Ctx, Flow};

use super::shared::Usage;

pub const CONNECT_TCP: Usage = Usage {
    name: "connectTcp",
    args: "<host> <port>",
};

pub const DISCONNECT_TCP: Usage = Usage {
    name: "disconnectTcp",
    args: "",
};

pub fn connect_tcp(ctx: &mut Ctx, tokens: &[&str]) -> Result<Flow> {
    if tokens.len() != 3 {
        return CONNECT_TCP.wrong_count(ctx);
    }
    let host = tokens[1];
    let Some(port) = CONNECT_TCP.parse_u16(ctx, tokens[2])? else {
        return Ok(Flow::Continue);
    };

    let started = Instant::now();
    if ctx.station.connect(host, port) {
        ctx.session.set_endpoint(host, port);
        log_debug!(
            "connected to {}:{} in {} ms",
            host,
            port,
            started.elapsed().as_millis()
        );
    } else {
        writeln!(ctx.out, "Unable to connect!")?;
    }
    Ok(Flow::Continue)
}

pub fn disconnect_tcp(ctx: &mut Ctx, _tokens: &[&str]) -> Result<Flow> {
    ctx.station.disconnect();
    ctx.session.clear_endpoint();
    Ok(Flow::Continue)
}

/* ---- Tests ---- */

#[cfg(test)]
mod tests {
    use crate::repl::testing::{exec_line, exec_line_with};
    use crate::repl::{Flow, Session};
    use crate::station::SimStation;

    #[test]
    fn connect_success_updates_prompt() {
        let mut sim = SimStation::new();
        let mut session = Session::new();
        let (flow, out) = exec_line_with(&mut sim, &mut session, "", "connectTcp car.local 65191");
        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
        assert_eq!(session.prompt(), "car.local:65191> ");
        assert_eq!(sim.endpoint(), Some(("car.local", 65191)));
    }

    #[test]
    fn connect_failure_keeps_prompt() {
        let mut sim = SimStation::new();
        sim.set_reachable(false);
        let mut session = Session::new();
        let (_, out) = exec_line_with(&mut sim, &mut session, "", "connectTcp car.local 65191");
        assert_eq!(out, "Unable to connect!\n");
        assert_eq!(session.prompt(), "> ");
    }

    #[test]
    fn connect_arity_checked() {
        let mut sim = SimStation::new();
        let (_, out) = exec_line(&mut sim, "", "connectTcp car.local");
        assert!(out.starts_with("Wrong number of arguments!"));
        assert!(out.contains("Usage: connectTcp <host> <port>"));
        assert_eq!(sim.endpoint(), None);
    }

    #[test]
    fn connect_rejects_bad_port() {
        let mut sim = SimStation::new();
        let (_, out) = exec_line(&mut sim, "", "connectTcp car.local lots");
        assert!(out.starts_with("Invalid number: 'lots'"));
        assert_eq!(sim.endpoint(), None);
    }

    #[test]
    fn disconnect_always_resets_prompt() {
        let mut sim = SimStation::new();
        let mut session = Session::new();
        exec_line_with(&mut sim, &mut session, "", "connectTcp car.local 65191");
        let (_, out) = exec_line_with(&mut sim, &mut session, "", "disconnectTcp");
        assert!(out.is_empty());
        assert_eq!(session.prompt(), "> ");
        assert_eq!(sim.endpoint(), None);

        // Not connected at all: still resets quietly.
        let (_, out) = exec_line_with(&mut sim, &mut session, "", "disconnectTcp");
        assert!(out.is_empty());
        assert_eq!(session.prompt(), "> ");
    }
}
