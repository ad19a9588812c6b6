//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use coilgun_sim::EventKind;
use coilgun_store::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "coilgun", version, about = "Simulate a capsule driven through a coil accelerator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a system and write the full report.
    Simulate {
        #[command(flatten)]
        target: Target,
        /// Report encoding: `json` or `msgpack`.
        #[arg(long, default_value = "json")]
        format: ReportFormat,
        /// Write the report here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Run a system and print its engagement events.
    Events {
        #[command(flatten)]
        target: Target,
        /// Only events of this kind (e.g. `coil_exit`).
        #[arg(long)]
        kind: Option<EventKind>,
        /// Only events of this coil.
        #[arg(long)]
        coil: Option<u64>,
    },
    /// Run a system and print the energy spent per coil.
    Energy {
        #[command(flatten)]
        target: Target,
    },
    /// List the systems defined in a scenario.
    Systems {
        /// Scenario JSON file.
        scenario: PathBuf,
    },
}

/// Which system of which scenario to run.
#[derive(Debug, Args)]
pub struct Target {
    /// Scenario JSON file.
    pub scenario: PathBuf,
    /// Id of the system to run.
    #[arg(long, short)]
    pub system: u64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::parse_from([
            "coilgun", "simulate", "demo.json", "--system", "2", "--format", "msgpack",
        ]);
        match cli.command {
            Command::Simulate {
                target,
                format,
                output,
            } => {
                assert_eq!(target.system, 2);
                assert_eq!(format, ReportFormat::MessagePack);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_events_filter() {
        let cli = Cli::parse_from([
            "coilgun", "events", "demo.json", "-s", "1", "--kind", "coil_exit", "--coil", "3",
        ]);
        match cli.command {
            Command::Events { kind, coil, .. } => {
                assert_eq!(kind, Some(EventKind::CoilExit));
                assert_eq!(coil, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
