/*!
shared.rs - helpers common to the command handlers.

Focus:
  - `Usage`: one command's name + argument synopsis, with the arity and
    numeric-argument error reporting built on top of it
  - timeout defaulting for the trailing optional `[timeoutms]` argument
  - shared constants (default timeout, route buffer capacity)

Numeric arguments are parsed strictly: malformed text is rejected with a
message instead of silently becoming zero the way the original C tool's
atoi did.
*/

use std::io::Write;

use anyhow::Result;

use crate::repl::{Ctx, Flow};

/// Timeout handed to the backend when the operator omits `[timeoutms]`.
pub const DEFAULT_TIMEOUT_MS: i32 = 1000;

/// Point capacity requested from the backend by `getRoute`.
pub const ROUTE_CAPACITY: usize = 4096;

/// Name and argument synopsis of one command, shared between the command
/// table and the handler's own error reporting.
pub struct Usage {
    pub name: &'static str,
    pub args: &'static str,
}

impl Usage {
    fn line(&self) -> String {
        if self.args.is_empty() {
            format!("Usage: {}", self.name)
        } else {
            format!("Usage: {} {}", self.name, self.args)
        }
    }

    /// Report a wrong argument count and keep the loop running.
    pub fn wrong_count(&self, ctx: &mut Ctx) -> Result<Flow> {
        writeln!(ctx.out, "Wrong number of arguments!")?;
        writeln!(ctx.out, "{}", self.line())?;
        Ok(Flow::Continue)
    }

    /// Strictly parse an integer argument; `None` means the message has
    /// been printed and the handler should return `Flow::Continue`.
    pub fn parse_i32(&self, ctx: &mut Ctx, raw: &str) -> Result<Option<i32>> {
        match raw.parse::<i32>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => self.reject_number(ctx, raw),
        }
    }

    /// Strictly parse a TCP port argument.
    pub fn parse_u16(&self, ctx: &mut Ctx, raw: &str) -> Result<Option<u16>> {
        match raw.parse::<u16>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => self.reject_number(ctx, raw),
        }
    }

    /// Resolve the trailing optional `[timeoutms]` argument at `idx`,
    /// defaulting when absent.
    pub fn timeout(&self, ctx: &mut Ctx, tokens: &[&str], idx: usize) -> Result<Option<i32>> {
        match tokens.get(idx) {
            Some(raw) => self.parse_i32(ctx, raw),
            None => Ok(Some(DEFAULT_TIMEOUT_MS)),
        }
    }

    fn reject_number<T>(&self, ctx: &mut Ctx, raw: &str) -> Result<Option<T>> {
        writeln!(ctx.out, "Invalid number: '{raw}'")?;
        writeln!(ctx.out, "{}", self.line())?;
        Ok(None)
    }
}

/* ---- Tests ---- */
