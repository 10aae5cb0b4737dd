use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cmd;
mod repl;
mod station;
mod utils;

/// SDVPT - interactive console for the RControlStation vehicle service.
///
/// All interaction happens at the prompt; type "help" there for the command
/// list. Process-level flags only tune logging and preload the simulated
/// station:
///
///   sdvpt                        plain interactive session
///   sdvpt -v                     with debug logging on stderr
///   sdvpt --fixture demo.json    simulator preloaded from a JSON fixture
#[derive(Parser, Debug)]
#[command(
    name = "sdvpt",
    version,
    about = "Interactive console for the RControlStation vehicle service",
    disable_help_subcommand = true
)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Preload the simulated station from a JSON fixture file
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    let mut station = match &cli.fixture {
        Some(path) => {
            crate::log_info!("loading simulator fixture from {}", path.display());
            match station::SimStation::from_fixture_path(path) {
                Ok(sim) => sim,
                Err(e) => {
                    crate::log_error!("{e:#}");
                    std::process::exit(2);
                }
            }
        }
        None => station::SimStation::new(),
    };
    crate::log_debug!("backend: in-process simulated station");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    repl::run(&mut station, &mut input, &mut out)
}
