use std::collections::BTreeMap;

use glam::Vec3;
use serde::Serialize;

use crate::config::PaletteConfig;
use crate::events::{EventRecorder, InteractionEvent};
use crate::hand::{HandId, HandPose};
use crate::math::yaw_towards;
use crate::oracle::{InteractionOracle, Target, TargetKind};
use crate::scene::{Rig, Seat};

/// Whether the player is standing or seated, and where.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SeatingState {
    #[default]
    Standing,
    Seated {
        seat: usize,
    },
}

impl SeatingState {
    pub fn is_seated(&self) -> bool {
        matches!(self, SeatingState::Seated { .. })
    }

    pub fn occupied_seat(&self) -> Option<usize> {
        match self {
            SeatingState::Seated { seat } => Some(*seat),
            SeatingState::Standing => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatOutcome {
    pub hovered_seat: Option<usize>,
    pub state: SeatingState,
}

#[derive(Debug, Default, Clone, Copy)]
struct HandSeatState {
    pinching: bool,
}

/// Sit/stand state machine driven by pinch rising edges.
#[derive(Debug)]
pub struct SeatTracker {
    state: SeatingState,
    focal_point: Vec3,
    pinch_history: BTreeMap<HandId, HandSeatState>,
}

impl SeatTracker {
    pub fn new(focal_point: Vec3) -> Self {
        Self {
            state: SeatingState::Standing,
            focal_point,
            pinch_history: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> SeatingState {
        self.state
    }

    pub(crate) fn evaluate(
        &mut self,
        hands: &[HandPose],
        seats: &mut [Seat],
        rig: &mut Rig,
        oracle: &dyn InteractionOracle,
        palette: &PaletteConfig,
        recorder: &mut EventRecorder<'_>,
    ) -> SeatOutcome {
        for seat in seats.iter_mut() {
            seat.material.color = palette.seat_idle;
        }

        let mut hovered_seat: Option<usize> = None;
        for hand in hands {
            for seat in seats.iter_mut() {
                let target = Target {
                    kind: TargetKind::Seat(seat.index()),
                    bounds: seat.bounds(),
                };
                if oracle.touching(hand, &target) {
                    seat.material.color = palette.seat_hovered;
                    if hovered_seat.is_none() {
                        hovered_seat = Some(seat.index());
                    }
                }
            }
        }

        for hand in hands {
            let pinching = oracle.pinching(hand);
            let previous = self
                .pinch_history
                .insert(hand.id, HandSeatState { pinching })
                .map(|state| state.pinching)
                .unwrap_or(false);
            if !pinching || previous {
                continue;
            }

            match (self.state, hovered_seat) {
                (SeatingState::Standing, Some(index)) => {
                    if let Some(seat) = seats.iter().find(|seat| seat.index() == index) {
                        self.sit(seat, rig);
                        recorder.emit(InteractionEvent::Seated { seat: index });
                    }
                }
                (SeatingState::Seated { seat }, _) => {
                    self.stand(rig);
                    recorder.emit(InteractionEvent::Stood { seat });
                }
                (SeatingState::Standing, None) => {
                    log::debug!("hand {} pinched with no seat hovered", hand.id);
                }
            }
        }

        SeatOutcome {
            hovered_seat,
            state: self.state,
        }
    }

    fn sit(&mut self, seat: &Seat, rig: &mut Rig) {
        let position = seat.position();
        rig.position = Vec3::new(position.x, 0.0, position.z);
        rig.yaw = yaw_towards(position, self.focal_point);
        self.state = SeatingState::Seated {
            seat: seat.index(),
        };
    }

    fn stand(&mut self, rig: &mut Rig) {
        rig.position = Vec3::ZERO;
        self.state = SeatingState::Standing;
    }
}
