//! Touch and pinch predicates consumed by the subsystems.
//!
//! The interaction core never decides on its own whether a hand touches
//! something or pinches; it asks an [`InteractionOracle`]. Oracles are
//! stateless per call and answer for the current frame only.

use crate::config::OracleConfig;
use crate::hand::HandPose;
use crate::math::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetKind {
    Object,
    Seat(usize),
}

/// Something a hand can touch, with its current world bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub kind: TargetKind,
    pub bounds: Aabb,
}

pub trait InteractionOracle {
    fn touching(&self, hand: &HandPose, target: &Target) -> bool;
    fn pinching(&self, hand: &HandPose) -> bool;
}

/// Fingertip-sphere touch test and thumb/index distance pinch test.
#[derive(Debug, Clone)]
pub struct ProximityOracle {
    touch_radius: f32,
    pinch_threshold: f32,
}

impl ProximityOracle {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            touch_radius: config.touch_radius,
            pinch_threshold: config.pinch_threshold,
        }
    }
}

impl Default for ProximityOracle {
    fn default() -> Self {
        Self::new(&OracleConfig::default())
    }
}

impl InteractionOracle for ProximityOracle {
    fn touching(&self, hand: &HandPose, target: &Target) -> bool {
        match hand.index_tip {
            Some(tip) => target.bounds.distance_to(tip) <= self.touch_radius,
            None => false,
        }
    }

    fn pinching(&self, hand: &HandPose) -> bool {
        match (hand.index_tip, hand.thumb_tip) {
            (Some(index), Some(thumb)) => index.distance(thumb) <= self.pinch_threshold,
            _ => false,
        }
    }
}
