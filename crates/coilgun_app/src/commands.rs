//! Command implementations.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::info;

use coilgun_model::{CoilId, SystemId};
use coilgun_sim::{EventFilter, EventKind, RunContext, SimulationReport};
use coilgun_store::{MemoryStore, ReportFormat, RunLog, Scenario};

/// A scenario loaded into memory alongside an empty run log.
pub struct Session {
    pub store: MemoryStore,
    pub log: RunLog,
}

impl Session {
    /// Read and load a scenario file.
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario = Scenario::from_json(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        let store = MemoryStore::from_scenario(scenario)?;
        info!(scenario = %path.display(), "scenario loaded");
        Ok(Self {
            store,
            log: RunLog::new(),
        })
    }

    /// Resolve and run one system, recording it in the run log.
    ///
    /// A run that fails is recorded as failed before the error is returned.
    /// A system that does not resolve (unknown entity, coil out of range,
    /// overlapping coils) never becomes a run and leaves the log untouched.
    pub fn run_system(&self, system_id: u64) -> Result<(RunContext, SimulationReport)> {
        let system_id = SystemId(system_id);
        let config = self
            .store
            .system(system_id)
            .ok_or_else(|| anyhow!("{system_id} is not defined in the scenario"))?;
        let system = coilgun_sim::resolve(&config, &self.store)?;

        let ctx = RunContext::new(system_id);
        self.log.start_run(&ctx, system.details());
        match coilgun_sim::run(&ctx, &system, &mut &self.log) {
            Ok(outcome) => {
                self.log.complete_run(ctx.run_id, outcome.summary)?;
                let report = outcome.into_report(&ctx, system.details());
                Ok((ctx, report))
            }
            Err(e) => {
                self.log.fail_run(ctx.run_id, e.to_string())?;
                Err(e.into())
            }
        }
    }
}

pub fn simulate(
    scenario: &Path,
    system_id: u64,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let session = Session::open(scenario)?;
    let (_, report) = session.run_system(system_id)?;
    let bytes = coilgun_store::encode(&report, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("writing report {}", path.display()))?;
            info!(output = %path.display(), bytes = bytes.len(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

pub fn events(
    scenario: &Path,
    system_id: u64,
    kind: Option<EventKind>,
    coil: Option<u64>,
) -> Result<()> {
    let session = Session::open(scenario)?;
    let (ctx, _) = session.run_system(system_id)?;
    let filter = EventFilter {
        kind,
        coil_id: coil.map(CoilId),
    };
    let events = session.log.events(ctx.run_id, &filter)?;
    print_json(&events)
}

pub fn energy(scenario: &Path, system_id: u64) -> Result<()> {
    let session = Session::open(scenario)?;
    let (ctx, _) = session.run_system(system_id)?;
    let breakdown = session.log.energy_consumption(ctx.run_id)?;
    print_json(&breakdown)
}

pub fn systems(scenario: &Path) -> Result<()> {
    let session = Session::open(scenario)?;
    print_json(&session.store.systems())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let bytes = coilgun_store::encode(value, ReportFormat::Json)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
