use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tabletop_interaction::{HandId, HandPose};

/// Frame of reference the recorded joint positions are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSpace {
    /// Relative to the player rig, as XR runtimes report tracked joints.
    #[default]
    Rig,
    World,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    pub id: HandId,
    #[serde(default)]
    pub index_tip: Option<[f32; 3]>,
    #[serde(default)]
    pub thumb_tip: Option<[f32; 3]>,
}

impl HandSample {
    fn open(id: u32, tip: Vec3) -> Self {
        Self {
            id: HandId(id),
            index_tip: Some(tip.to_array()),
            thumb_tip: Some((tip + Vec3::new(0.06, 0.0, 0.0)).to_array()),
        }
    }

    fn pinched(id: u32, tip: Vec3) -> Self {
        Self {
            id: HandId(id),
            index_tip: Some(tip.to_array()),
            thumb_tip: Some((tip + Vec3::new(0.01, 0.0, 0.0)).to_array()),
        }
    }

    pub fn pose(&self) -> HandPose {
        HandPose {
            id: self.id,
            index_tip: self.index_tip.map(Vec3::from_array),
            thumb_tip: self.thumb_tip.map(Vec3::from_array),
        }
    }
}

/// A hand set held for `frames` consecutive frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSegment {
    pub frames: u32,
    #[serde(default)]
    pub hands: Vec<HandSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandTrace {
    #[serde(default)]
    pub space: TraceSpace,
    pub segments: Vec<TraceSegment>,
}

impl HandTrace {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading hand trace from {}", path.display()))?;
        let trace: HandTrace = serde_json::from_str(&data)
            .with_context(|| format!("parsing hand trace from {}", path.display()))?;
        ensure!(
            trace.total_frames() > 0,
            "hand trace {} contains no frames",
            path.display()
        );
        Ok(trace)
    }

    pub fn total_frames(&self) -> u64 {
        self.segments
            .iter()
            .map(|segment| u64::from(segment.frames))
            .sum()
    }

    /// Hand sets in playback order, one entry per frame.
    pub fn frames(&self) -> impl Iterator<Item = &[HandSample]> + '_ {
        self.segments.iter().flat_map(|segment| {
            (0..segment.frames).map(move |_| segment.hands.as_slice())
        })
    }

    /// Reach the object, grab and carry it, put it down, sit on seat 0, then
    /// stand up again. Hand 1 idles in front of the player throughout.
    pub fn demo() -> Self {
        let object = Vec3::new(0.0, 1.2, -0.5);
        let seat_top = Vec3::new(2.15, 0.5, -1.0);
        let lap = Vec3::new(0.2, 1.0, 0.3);
        let idle = HandSample::open(1, Vec3::new(0.3, 0.9, 0.2));

        let segment = |frames: u32, hand: HandSample| TraceSegment {
            frames,
            hands: vec![hand, idle.clone()],
        };

        let mut segments = vec![
            segment(10, HandSample::open(0, Vec3::new(0.0, 1.0, 0.0))),
            segment(5, HandSample::open(0, object)),
            segment(3, HandSample::pinched(0, object)),
        ];
        let mut tip = object;
        for _ in 0..5 {
            tip += Vec3::new(0.02, 0.0, 0.0);
            segments.push(segment(1, HandSample::pinched(0, tip)));
        }
        segments.extend([
            segment(5, HandSample::open(0, tip)),
            segment(5, HandSample::open(0, seat_top)),
            segment(3, HandSample::pinched(0, seat_top)),
            segment(5, HandSample::open(0, lap)),
            segment(3, HandSample::pinched(0, lap)),
            segment(5, HandSample::open(0, lap)),
        ]);

        Self {
            space: TraceSpace::Rig,
            segments,
        }
    }
}
