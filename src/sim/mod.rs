//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One step per display frame, constants in per-frame units
//! - Wall-clock time only enters through `Session::advance_clock`
//! - Seeded RNG only
//! - No rendering, audio or DOM dependencies

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Rect, first_collision, padded_overlap};
pub use scoring::Scoreboard;
pub use session::Session;
pub use snapshot::{FrameSnapshot, ObstacleView, PlayerView};
pub use state::{GameEvent, GamePhase, LaneCues, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, autopilot_wants_jump, tick};
