/*!
`meta.rs`

Commands about the shell itself: `help` and the terminating `exit`/`q`
pair. `help` renders the command table, so a new command shows up there by
being registered, nothing else.
*/

use std::io::Write;

use anyhow::Result;

use crate::repl::{Ctx, Flow};

use super::format::{StyleOptions, TableOpts, table};
use super::shared::Usage;

pub const HELP: Usage = Usage {
    name: "help",
    args: "",
};

pub const EXIT: Usage = Usage {
    name: "exit",
    args: "",
};

pub fn help(ctx: &mut Ctx, _tokens: &[&str]) -> Result<Flow> {
    let style = StyleOptions::detect();
    let rows: Vec<Vec<String>> = super::table()
        .iter()
        .map(|c| {
            let synopsis = if c.usage.is_empty() {
                c.name.to_string()
            } else {
                format!("{} {}", c.name, c.usage)
            };
            vec![synopsis, c.summary.to_string()]
        })
        .collect();
    let rendered = table(
        &["COMMAND", "DESCRIPTION"],
        &rows,
        TableOpts::default(),
        &style,
    );
    writeln!(ctx.out, "{rendered}")?;
    Ok(Flow::Continue)
}

/// Shared by `exit` and its alias `q`; trailing arguments are ignored.
pub fn exit(_ctx: &mut Ctx, _tokens: &[&str]) -> Result<Flow> {
    Ok(Flow::Quit)
}

/* ---- Tests ---- */
