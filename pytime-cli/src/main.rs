//! Pytime CLI - Command-line REPL and script runner
//!
//! This is a thin wrapper around pytime-core that builds the executable.
//! With no arguments it starts a REPL; with a path it runs that script.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (for example `RUST_LOG=pytime_core=debug`).

mod repl;
mod script;
mod stdout_output;

use pytime_core::TimeConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TimeConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let mut args = std::env::args().skip(1);
    match (args.next(), args.next()) {
        (None, _) => repl::run_repl(&config),
        (Some(path), None) => {
            let code = script::run_script(&path, &config)?;
            std::process::exit(code);
        }
        (Some(_), Some(_)) => {
            eprintln!("usage: pytime [script.py]");
            std::process::exit(2);
        }
    }
}
