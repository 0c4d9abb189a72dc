use glam::Affine3A;
use serde::Serialize;

use crate::config::{ConfigError, InteractionConfig};
use crate::events::{DiagnosticsSink, EventRecorder, InteractionEvent};
use crate::grab::GrabTracker;
use crate::hand::{HandId, HandPose};
use crate::oracle::InteractionOracle;
use crate::scene::{build_entities, ManipulableObject, Rig, Seat, Table};
use crate::seating::{SeatTracker, SeatingState};

/// Effects of one [`InteractionWorld::update`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub events: Vec<InteractionEvent>,
    pub object_touched: bool,
    pub holder: Option<HandId>,
    pub hovered_seat: Option<usize>,
    pub seating: SeatingState,
}

/// Owns the table, seats and object, plus all interaction state.
///
/// Call [`update`](Self::update) exactly once per rendered frame.
#[derive(Debug)]
pub struct InteractionWorld {
    config: InteractionConfig,
    table: Table,
    seats: Vec<Seat>,
    object: ManipulableObject,
    grab: GrabTracker,
    seating: SeatTracker,
    frame: u64,
}

impl InteractionWorld {
    pub fn new(config: InteractionConfig, root: Affine3A) -> Result<Self, ConfigError> {
        config.validate()?;
        let (table, seats, object) = build_entities(
            &config.layout,
            root,
            config.palette.seat_idle,
            config.palette.object_idle,
        );
        let focal_point = root.transform_point3(config.layout.focal_point());
        let world = Self {
            grab: GrabTracker::new(config.grab_policy),
            seating: SeatTracker::new(focal_point),
            config,
            table,
            seats,
            object,
            frame: 0,
        };
        log::info!("world ready: {}", world.world_summary());
        Ok(world)
    }

    /// One-line description of the constructed scene.
    pub fn world_summary(&self) -> String {
        format!(
            "table + {} seats + object ({:?} grab)",
            self.seats.len(),
            self.config.grab_policy
        )
    }

    pub fn update(
        &mut self,
        hands: &[HandPose],
        rig: &mut Rig,
        oracle: &dyn InteractionOracle,
        sink: &mut dyn DiagnosticsSink,
    ) -> FrameReport {
        self.frame += 1;
        let mut events = Vec::new();
        let mut recorder = EventRecorder::new(&mut events, sink);

        let grab = self.grab.evaluate(
            hands,
            &mut self.object,
            rig,
            oracle,
            &self.config.palette,
            &mut recorder,
        );
        let seat = self.seating.evaluate(
            hands,
            &mut self.seats,
            rig,
            oracle,
            &self.config.palette,
            &mut recorder,
        );

        FrameReport {
            frame: self.frame,
            events,
            object_touched: grab.touched,
            holder: grab.holder,
            hovered_seat: seat.hovered_seat,
            seating: seat.state,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index)
    }

    pub fn object(&self) -> &ManipulableObject {
        &self.object
    }

    /// Mutable access for hosts that re-parent the object (e.g. onto the rig).
    pub fn object_mut(&mut self) -> &mut ManipulableObject {
        &mut self.object
    }

    pub fn seating(&self) -> SeatingState {
        self.seating.state()
    }

    pub fn is_grabbing(&self, hand: HandId) -> bool {
        self.grab.is_grabbing(hand)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
