//! # coilgun
//!
//! Command-line front end. Loads a scenario file into an in-memory store,
//! runs one of its systems and prints what happened.
//!
//! ```text
//! coilgun simulate demos/single_coil.json --system 1
//! coilgun events demos/three_coils.json --system 1 --kind coil_exit
//! coilgun energy demos/three_coils.json --system 1
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("coilgun_app=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate {
            target,
            format,
            output,
        } => commands::simulate(&target.scenario, target.system, format, output.as_deref()),
        Command::Events { target, kind, coil } => {
            commands::events(&target.scenario, target.system, kind, coil)
        }
        Command::Energy { target } => commands::energy(&target.scenario, target.system),
        Command::Systems { scenario } => commands::systems(&scenario),
    }
}
