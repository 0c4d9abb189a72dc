use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::LocalSpace;

/// Stable handle for a tracked hand, assigned by the host (e.g. 0 = left, 1 = right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandId(pub u32);

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Joint positions of one hand for the current frame, in world space.
///
/// Either joint may be missing when the device loses joint tracking; consumers
/// skip whatever depends on it for that frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    pub id: HandId,
    pub index_tip: Option<Vec3>,
    pub thumb_tip: Option<Vec3>,
}

impl HandPose {
    pub fn new(id: HandId) -> Self {
        Self {
            id,
            index_tip: None,
            thumb_tip: None,
        }
    }

    pub fn with_index_tip(mut self, position: Vec3) -> Self {
        self.index_tip = Some(position);
        self
    }

    pub fn with_thumb_tip(mut self, position: Vec3) -> Self {
        self.thumb_tip = Some(position);
        self
    }

    /// Re-expresses joints tracked relative to `space` (usually the rig) in world space.
    pub fn to_world(&self, space: &impl LocalSpace) -> Self {
        Self {
            id: self.id,
            index_tip: self.index_tip.map(|tip| space.local_to_world(tip)),
            thumb_tip: self.thumb_tip.map(|tip| space.local_to_world(tip)),
        }
    }
}
