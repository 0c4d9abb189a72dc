use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde::Deserialize;
use tempfile::tempdir;

const EPSILON: f32 = 1e-4;

#[derive(Debug, Deserialize)]
struct FrameSample {
    frame: u64,
    rig_position: [f32; 3],
    rig_yaw: f32,
    seated_at: Option<usize>,
    object_position: [f32; 3],
    holder: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EventLog {
    events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    frame: u64,
    tag: String,
    message: String,
}

struct ReplayLogs {
    frames: Vec<FrameSample>,
    events: Vec<EventEntry>,
}

fn run_replay(args: &[&str]) -> Result<ReplayLogs> {
    let temp_dir = tempdir().context("creating temporary directory for replay logs")?;
    let frame_log = temp_dir.path().join("frames.json");
    let event_log = temp_dir.path().join("events.json");

    let status = Command::new(env!("CARGO_BIN_EXE_tabletop_engine"))
        .args(args)
        .arg("--frame-log-json")
        .arg(&frame_log)
        .arg("--event-log-json")
        .arg(&event_log)
        .status()
        .context("executing tabletop_engine")?;
    assert!(status.success(), "tabletop_engine exited with {status:?}");

    let frames: Vec<FrameSample> = read_json(&frame_log)?;
    let events: EventLog = read_json(&event_log)?;
    Ok(ReplayLogs {
        frames,
        events: events.events,
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn approx(actual: [f32; 3], expected: [f32; 3]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| (a - e).abs() < EPSILON)
}

fn event_labels(events: &[EventEntry]) -> Vec<(u64, &str)> {
    events
        .iter()
        .map(|entry| (entry.frame, entry.message.as_str()))
        .collect()
}

#[test]
fn demo_replay_grabs_then_sits_and_stands() -> Result<()> {
    let logs = run_replay(&["--demo"])?;

    assert_eq!(logs.frames.len(), 49, "demo frame count changed");
    assert_eq!(
        event_labels(&logs.events),
        vec![
            (16, "Hand 0 grabbing box"),
            (24, "Hand 0 released box"),
            (34, "Seated at seat 0"),
            (42, "Stood up (from seat 0)"),
        ]
    );
    let tags: Vec<&str> = logs.events.iter().map(|entry| entry.tag.as_str()).collect();
    assert_eq!(tags, vec!["[ACTION]", "[ACTION]", "[SEAT]", "[SEAT]"]);

    let seated = &logs.frames[33];
    assert_eq!(seated.frame, 34);
    assert_eq!(seated.seated_at, Some(0));
    assert!(
        approx(seated.rig_position, [2.15, 0.0, -1.0]),
        "rig not moved onto seat 0: {:?}",
        seated.rig_position
    );
    assert!((seated.rig_yaw + std::f32::consts::FRAC_PI_2).abs() < EPSILON);

    let last = logs.frames.last().context("frame log is empty")?;
    assert_eq!(last.seated_at, None);
    assert!(approx(last.rig_position, [0.0, 0.0, 0.0]));
    assert!(approx(last.object_position, [0.1, 1.2, -0.5]));
    Ok(())
}

#[test]
fn exclusive_grab_hands_over_between_hands() -> Result<()> {
    let trace = fixture("two_hand_trace.json");
    let trace_arg = trace.to_str().context("fixture path is not valid UTF-8")?;
    let logs = run_replay(&["--trace", trace_arg])?;

    assert_eq!(logs.frames.len(), 12);
    assert_eq!(
        event_labels(&logs.events),
        vec![
            (3, "Hand 0 grabbing box"),
            (9, "Hand 0 released box"),
            (9, "Hand 1 grabbing box"),
        ]
    );
    for sample in &logs.frames[5..8] {
        assert_eq!(sample.holder, Some(0), "frame {}", sample.frame);
    }

    let last = logs.frames.last().context("frame log is empty")?;
    assert_eq!(last.holder, Some(1));
    assert!(approx(last.object_position, [0.03, 1.2, -0.5]));
    assert!(approx(last.rig_position, [0.0, 0.0, 0.0]));
    Ok(())
}

#[test]
fn last_writer_wins_lets_second_hand_take_over() -> Result<()> {
    let trace = fixture("two_hand_trace.json");
    let trace_arg = trace.to_str().context("fixture path is not valid UTF-8")?;
    let logs = run_replay(&["--trace", trace_arg, "--grab-policy", "last-writer-wins"])?;

    assert_eq!(
        event_labels(&logs.events),
        vec![
            (3, "Hand 0 grabbing box"),
            (6, "Hand 1 grabbing box"),
            (9, "Hand 0 released box"),
        ]
    );
    assert_eq!(logs.frames[5].holder, Some(1));
    assert!(approx(logs.frames[5].object_position, [0.03, 1.2, -0.5]));
    Ok(())
}

#[test]
fn trace_and_demo_together_fail() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_tabletop_engine"))
        .args(["--trace", "hands.json", "--demo"])
        .output()
        .context("executing tabletop_engine")?;
    assert!(!output.status.success());
    Ok(())
}
