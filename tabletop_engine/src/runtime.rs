use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Affine3A;
use serde::Serialize;
use tabletop_interaction::{InteractionConfig, InteractionWorld, LogSink, ProximityOracle, Rig};

use crate::cli::{ReplayArgs, TraceSource};
use crate::replay::{replay_trace, EventLogEntry};
use crate::trace::HandTrace;

pub fn execute(args: ReplayArgs) -> Result<()> {
    let ReplayArgs {
        config,
        source,
        grab_policy,
        frame_log_json,
        event_log_json,
        verbose,
    } = args;

    let mut config = match config.as_deref() {
        Some(path) => InteractionConfig::from_json_file(path)
            .with_context(|| format!("loading interaction config {}", path.display()))?,
        None => InteractionConfig::default(),
    };
    if let Some(policy) = grab_policy {
        config.grab_policy = policy;
    }

    let trace = match &source {
        TraceSource::File(path) => HandTrace::from_json_file(path)?,
        TraceSource::Demo => HandTrace::demo(),
    };
    log::info!(
        "replaying {} frames of {:?}-space hand samples",
        trace.total_frames(),
        trace.space
    );

    let oracle = ProximityOracle::new(&config.oracle);
    let mut world =
        InteractionWorld::new(config, Affine3A::IDENTITY).context("building interaction world")?;
    let mut rig = Rig::default();
    let mut sink = LogSink;
    println!("{}", world.world_summary());

    let outcome = replay_trace(&mut world, &mut rig, &trace, &oracle, &mut sink, verbose);

    println!(
        "Replayed {} frames: {} events, final state {:?}",
        outcome.samples.len(),
        outcome.events.len(),
        world.seating()
    );

    if let Some(path) = frame_log_json.as_ref() {
        write_json(path, &outcome.samples, "frame log")?;
        println!("Saved frame log to {}", path.display());
    }

    if let Some(path) = event_log_json.as_ref() {
        let log = EventLog {
            events: &outcome.events,
        };
        write_json(path, &log, "event log")?;
        println!("Saved event log to {}", path.display());
    }

    Ok(())
}

#[derive(Serialize)]
struct EventLog<'a> {
    events: &'a [EventLogEntry],
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, label: &str) -> Result<()> {
    let json =
        serde_json::to_string_pretty(value).with_context(|| format!("serializing {label} to JSON"))?;
    fs::write(path, json).with_context(|| format!("writing {label} to {}", path.display()))
}
