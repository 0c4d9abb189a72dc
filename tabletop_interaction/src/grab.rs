use std::collections::BTreeMap;

use crate::config::{GrabPolicy, PaletteConfig};
use crate::events::{EventRecorder, InteractionEvent};
use crate::hand::{HandId, HandPose};
use crate::oracle::{InteractionOracle, Target, TargetKind};
use crate::scene::{ManipulableObject, Rig};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct HandGrabState {
    grabbing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabOutcome {
    /// Whether any hand touched the object this frame.
    pub touched: bool,
    /// Last evaluated hand that held the object at the end of the frame.
    pub holder: Option<HandId>,
}

/// Per-hand grab bookkeeping for the single manipulable object.
#[derive(Debug, Default)]
pub struct GrabTracker {
    policy: GrabPolicy,
    states: BTreeMap<HandId, HandGrabState>,
}

impl GrabTracker {
    pub fn new(policy: GrabPolicy) -> Self {
        Self {
            policy,
            states: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> GrabPolicy {
        self.policy
    }

    pub fn is_grabbing(&self, hand: HandId) -> bool {
        self.states
            .get(&hand)
            .map(|state| state.grabbing)
            .unwrap_or(false)
    }

    pub(crate) fn evaluate(
        &mut self,
        hands: &[HandPose],
        object: &mut ManipulableObject,
        rig: &Rig,
        oracle: &dyn InteractionOracle,
        palette: &PaletteConfig,
        recorder: &mut EventRecorder<'_>,
    ) -> GrabOutcome {
        let mut touched = false;
        let mut holder = None;

        for hand in hands {
            let target = Target {
                kind: TargetKind::Object,
                bounds: object.world_bounds(rig),
            };
            if !oracle.touching(hand, &target) {
                if self.is_grabbing(hand.id) {
                    log::debug!("hand {} lost contact while grabbing; grab dropped", hand.id);
                }
                self.set_grabbing(hand.id, false);
                continue;
            }

            touched = true;
            object.material.color = palette.object_touched;

            let pinching = oracle.pinching(hand);
            let was_grabbing = self.is_grabbing(hand.id);
            if pinching && !was_grabbing {
                match self.blocking_holder(hand.id) {
                    Some(owner) => {
                        log::debug!("hand {} grab refused; object held by hand {owner}", hand.id);
                    }
                    None => {
                        self.set_grabbing(hand.id, true);
                        recorder.emit(InteractionEvent::GrabAcquired { hand: hand.id });
                    }
                }
            } else if !pinching && was_grabbing {
                self.set_grabbing(hand.id, false);
                recorder.emit(InteractionEvent::GrabReleased { hand: hand.id });
            }

            if !self.is_grabbing(hand.id) {
                continue;
            }
            holder = Some(hand.id);
            match hand.index_tip {
                Some(tip) => object.place_at_world(tip, rig),
                None => log::debug!("hand {} has no fingertip pose; object not moved", hand.id),
            }
        }

        if !touched {
            object.material.color = palette.object_idle;
        }

        GrabOutcome { touched, holder }
    }

    fn set_grabbing(&mut self, hand: HandId, grabbing: bool) {
        self.states.entry(hand).or_default().grabbing = grabbing;
    }

    /// Any other hand still holding the object, when ownership is exclusive.
    ///
    /// Hands missing from the current frame keep their grab, so an untracked
    /// owner still blocks until it reappears and lets go.
    fn blocking_holder(&self, hand: HandId) -> Option<HandId> {
        match self.policy {
            GrabPolicy::LastWriterWins => None,
            GrabPolicy::Exclusive => self
                .states
                .iter()
                .find(|(other, state)| **other != hand && state.grabbing)
                .map(|(other, _)| *other),
        }
    }
}
