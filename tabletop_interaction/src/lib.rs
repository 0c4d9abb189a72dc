//! Hand-driven interaction core for a seated-table VR scene.
//!
//! Every rendered frame the host passes the tracked hands and the player rig to
//! [`InteractionWorld::update`]. The world asks an [`InteractionOracle`] which
//! hands touch the object or a seat and which hands pinch, then:
//!
//! * lets a touching hand grab the object on a pinch and carry it by the
//!   index fingertip until the pinch opens;
//! * sits the player on the hovered seat (or stands them up) on a pinch
//!   rising edge, moving and turning the rig accordingly.
//!
//! State transitions are reported both in the returned [`FrameReport`] and as
//! tagged lines to a [`DiagnosticsSink`].

pub mod config;
pub mod events;
pub mod grab;
pub mod hand;
pub mod math;
pub mod oracle;
pub mod scene;
pub mod seating;
pub mod world;

pub use config::{ConfigError, GrabPolicy, InteractionConfig};
pub use events::{DiagnosticsSink, EventLog, InteractionEvent, LogSink, LoggedLine};
pub use hand::{HandId, HandPose};
pub use math::{Aabb, LocalSpace};
pub use oracle::{InteractionOracle, ProximityOracle, Target, TargetKind};
pub use scene::{Color, ManipulableObject, ParentFrame, Rig, Seat, Table};
pub use seating::SeatingState;
pub use world::{FrameReport, InteractionWorld};
