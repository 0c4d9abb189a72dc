use serde::Serialize;
use tabletop_interaction::{
    DiagnosticsSink, FrameReport, HandId, HandPose, InteractionOracle, InteractionWorld, Rig,
};

use crate::trace::{HandSample, HandTrace, TraceSpace};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FrameSample {
    pub(crate) frame: u64,
    pub(crate) rig_position: [f32; 3],
    pub(crate) rig_yaw: f32,
    pub(crate) seated_at: Option<usize>,
    pub(crate) object_position: [f32; 3],
    pub(crate) holder: Option<HandId>,
    pub(crate) hovered_seat: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) events: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct EventLogEntry {
    pub(crate) frame: u64,
    pub(crate) tag: String,
    pub(crate) message: String,
}

#[derive(Debug, Default)]
pub(crate) struct ReplayOutcome {
    pub(crate) samples: Vec<FrameSample>,
    pub(crate) events: Vec<EventLogEntry>,
}

pub(crate) fn replay_trace(
    world: &mut InteractionWorld,
    rig: &mut Rig,
    trace: &HandTrace,
    oracle: &dyn InteractionOracle,
    sink: &mut dyn DiagnosticsSink,
    verbose: bool,
) -> ReplayOutcome {
    let mut outcome = ReplayOutcome::default();

    for samples in trace.frames() {
        let hands = world_space_hands(samples, trace.space, rig);
        let report = world.update(&hands, rig, oracle, sink);

        for event in &report.events {
            println!("frame {} {event}", report.frame);
            outcome.events.push(EventLogEntry {
                frame: report.frame,
                tag: event.tag().to_string(),
                message: event.message(),
            });
        }

        let sample = capture_frame_sample(world, rig, &report);
        log::debug!(
            "frame {} touched={} hovered={:?} holder={:?}",
            report.frame,
            report.object_touched,
            report.hovered_seat,
            report.holder
        );
        if verbose {
            println!(
                "frame {} rig {:.3},{:.3},{:.3} yaw {:.3} seat {} holder {}",
                sample.frame,
                sample.rig_position[0],
                sample.rig_position[1],
                sample.rig_position[2],
                sample.rig_yaw,
                describe(sample.seated_at),
                describe(sample.holder),
            );
        }
        outcome.samples.push(sample);
    }

    outcome
}

fn world_space_hands(samples: &[HandSample], space: TraceSpace, rig: &Rig) -> Vec<HandPose> {
    let rig_transform = rig.transform();
    samples
        .iter()
        .map(|sample| match space {
            TraceSpace::World => sample.pose(),
            TraceSpace::Rig => sample.pose().to_world(&rig_transform),
        })
        .collect()
}

pub(crate) fn capture_frame_sample(
    world: &InteractionWorld,
    rig: &Rig,
    report: &FrameReport,
) -> FrameSample {
    FrameSample {
        frame: report.frame,
        rig_position: rig.position.to_array(),
        rig_yaw: rig.yaw,
        seated_at: report.seating.occupied_seat(),
        object_position: world.object().world_position(rig).to_array(),
        holder: report.holder,
        hovered_seat: report.hovered_seat,
        events: report.events.iter().map(ToString::to_string).collect(),
    }
}

fn describe<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|inner| inner.to_string())
        .unwrap_or_else(|| "-".to_string())
}
