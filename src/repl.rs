/*!
`repl.rs`

The interactive core of sdvpt: line tokenizer, command dispatch, and the
blocking read-eval loop.

Structure:
  - `tokenize`  : split one input line into whitespace-delimited tokens
  - `Flow`      : continuation signal returned by every handler
  - `Session`   : prompt text + connected endpoint, threaded through `Ctx`
  - `Ctx`       : everything a handler may touch (session, station, streams)
  - `dispatch`  : first-match lookup in the command table
  - `run`       : banner, prompt, read, tokenize, dispatch, repeat

The loop is single-threaded and fully synchronous: one line is processed to
completion (including the blocking backend call inside its handler) before
the next prompt is printed. End-of-input terminates the loop exactly as the
`exit` command does.
*/

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::cmd;
use crate::station::Station;

const BANNER: &str = "SDVPT\ntyping \"help\" shows a list of applicable commands";

/* -------------------------------------------------------------------------- */
/* Tokenizer                                                                  */
/* -------------------------------------------------------------------------- */

/// Split a raw input line on runs of space, tab, CR, and LF.
///
/// Tokens keep their left-to-right order; empty or whitespace-only input
/// yields an empty vector. No quoting, escaping, or comment syntax.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
        .filter(|t| !t.is_empty())
        .collect()
}

/* -------------------------------------------------------------------------- */
/* Flow / Session / Ctx                                                       */
/* -------------------------------------------------------------------------- */

/// Continuation signal: every handler either keeps the loop running or
/// terminates it. Only `exit`/`q` (and end-of-input) terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Connection status shown before every input line.
///
/// Created once per process; only the connect/disconnect handlers mutate it.
#[derive(Debug)]
pub struct Session {
    prompt: String,
    endpoint: Option<(String, u16)>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            prompt: "> ".to_string(),
            endpoint: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn endpoint(&self) -> Option<(&str, u16)> {
        self.endpoint.as_ref().map(|(h, p)| (h.as_str(), *p))
    }

    /// Record a successful connect; the prompt becomes `"<host>:<port>> "`.
    pub fn set_endpoint(&mut self, host: &str, port: u16) {
        self.prompt = format!("{host}:{port}> ");
        self.endpoint = Some((host.to_string(), port));
    }

    /// Forget the endpoint and restore the bare `"> "` prompt.
    pub fn clear_endpoint(&mut self) {
        self.prompt = "> ".to_string();
        self.endpoint = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-dispatch context handed to handlers.
///
/// `input` is the same stream the loop reads lines from, so commands that
/// consume extra lines (addRoutePoints, carTerminal) read exactly where the
/// operator left off. `out` receives all contractual command output.
pub struct Ctx<'a> {
    pub session: &'a mut Session,
    pub station: &'a mut dyn Station,
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
}

/// Handler signature: token 0 is the command's own name.
pub type Handler = fn(&mut Ctx, &[&str]) -> Result<Flow>;

/// One entry of the command table.
pub struct Command {
    pub name: &'static str,
    /// Argument synopsis for usage lines, e.g. `"<host> <port>"`.
    pub usage: &'static str,
    pub summary: &'static str,
    pub run: Handler,
}

/* -------------------------------------------------------------------------- */
/* Dispatch                                                                   */
/* -------------------------------------------------------------------------- */

/// Look up token 0 in the command table and invoke the matching handler.
///
/// Empty token sequences are a no-op. Lookup is case-sensitive and
/// first-registered-wins. An unknown name prints
/// `"<name>: command not found"`; neither case terminates the loop.
pub fn dispatch(ctx: &mut Ctx, tokens: &[&str]) -> Result<Flow> {
    let Some(&name) = tokens.first() else {
        return Ok(Flow::Continue);
    };
    for command in cmd::table() {
        if command.name == name {
            return (command.run)(ctx, tokens);
        }
    }
    writeln!(ctx.out, "{name}: command not found")?;
    Ok(Flow::Continue)
}

/* -------------------------------------------------------------------------- */
/* Loop                                                                       */
/* -------------------------------------------------------------------------- */

/// Run the shell until `exit`/`q` or end-of-input, then print `"Done!"`.
pub fn run(
    station: &mut dyn Station,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let mut session = Session::new();
    writeln!(out, "{BANNER}")?;

    loop {
        write!(out, "{}", session.prompt())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like `exit`.
            writeln!(out)?;
            break;
        }

        let tokens = tokenize(&line);
        crate::log_trace!("dispatching {tokens:?}");
        let mut ctx = Ctx {
            session: &mut session,
            station: &mut *station,
            input: &mut *input,
            out: &mut *out,
        };
        if dispatch(&mut ctx, &tokens)? == Flow::Quit {
            break;
        }
    }

    writeln!(out, "Done!")?;
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Test harness                                                               */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::station::SimStation;
    use std::io::Cursor;

    /// Dispatch one line against a simulator with a fresh session.
    ///
    /// `body` feeds handlers that read further input lines.
    pub fn exec_line(sim: &mut SimStation, body: &str, line: &str) -> (Flow, String) {
        let mut session = Session::new();
        exec_line_with(sim, &mut session, body, line)
    }

    /// Same as `exec_line` but against a caller-owned session, so prompt
    /// transitions can be asserted.
    pub fn exec_line_with(
        sim: &mut SimStation,
        session: &mut Session,
        body: &str,
        line: &str,
    ) -> (Flow, String) {
        let mut input = Cursor::new(body.as_bytes().to_vec());
        let mut out: Vec<u8> = Vec::new();
        let tokens = tokenize(line);
        let flow = {
            let mut ctx = Ctx {
                session,
                station: sim,
                input: &mut input,
                out: &mut out,
            };
            dispatch(&mut ctx, &tokens).expect("dispatch failed")
        };
        (flow, String::from_utf8(out).expect("non-utf8 output"))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
