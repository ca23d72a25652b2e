//! Dino Dash - A single-screen endless runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, obstacles, scoring, state machine)
//! - `sinks`: Render/audio/UI output contracts the simulation feeds
//! - `renderer`: WebGPU rendering of the playfield with solid shapes
//! - `audio`: Procedural Web Audio cues (wasm only)
//! - `settings`: Player preferences injected by the host page

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sinks;

pub use settings::Settings;
pub use sim::{Session, TickInput, tick};

/// Game configuration constants
///
/// Units are logical playfield units; velocities are per display frame.
pub mod consts {
    /// Logical playfield dimensions (independent of on-screen scaling)
    pub const PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Player box
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Player top edge when standing
    pub const GROUND_Y: f32 = 300.0;
    /// The floor line (player bottom when standing)
    pub const FLOOR_Y: f32 = GROUND_Y + PLAYER_HEIGHT;

    /// Downward acceleration (units/frame²)
    pub const GRAVITY: f32 = 0.8;
    /// Upward velocity applied on jump (units/frame)
    pub const JUMP_FORCE: f32 = 15.0;
    /// Debounce window after a jump
    pub const JUMP_COOLDOWN_MS: f64 = 100.0;

    /// Obstacle box
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    /// Air obstacles float this far above the player's standing top edge
    pub const AIR_CLEARANCE: f32 = 90.0;

    /// Spawner period (wall clock, not frame-synced)
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Spawning is refused once the active count exceeds this
    pub const MAX_OBSTACLES: usize = 3;
    /// Spawning is refused while any obstacle is right of `PLAYFIELD_WIDTH - MIN_SPAWN_DISTANCE`
    pub const MIN_SPAWN_DISTANCE: f32 = 200.0;
    /// Probability that a spawned obstacle is a Ground obstacle (otherwise Air)
    pub const P_GROUND: f32 = 0.4;

    /// Inset applied to every side of both boxes before overlap testing
    pub const HITBOX_PADDING: f32 = 10.0;

    /// Scroll speed at session start (units/frame)
    pub const BASE_SPEED: f32 = 6.0;
    /// Speed is bumped whenever the score lands on a multiple of this
    pub const SPEED_STEP_SCORE: u32 = 5;
    pub const SPEED_INCREMENT: f32 = 0.5;
}
