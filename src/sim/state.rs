//! Entities and session phase
//!
//! Plain data owned by the session; behaviour lives in the sibling modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; only `start()` leaves this phase
    GameOver,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub grounded: bool,
    /// Clock time before which jump requests are ignored
    pub jump_ready_at_ms: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            grounded: true,
            jump_ready_at_ms: 0.0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the floor; must be jumped over
    Ground,
    /// Floats above a standing player; only reachable mid-jump
    Air,
}

impl ObstacleKind {
    /// Top edge for an obstacle of this kind
    pub fn spawn_y(self) -> f32 {
        match self {
            // Bottom flush with the floor line
            ObstacleKind::Ground => GROUND_Y + PLAYER_HEIGHT - OBSTACLE_HEIGHT,
            ObstacleKind::Air => GROUND_Y - AIR_CLEARANCE,
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner; only x changes after spawn
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Create an obstacle of `kind` with its left edge at `x`
    pub fn spawn(id: u32, kind: ObstacleKind, x: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, kind.spawn_y()),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully scrolled past the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right_edge() < 0.0
    }

    /// Horizontally overlaps the visible playfield
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.right_edge() > 0.0 && self.pos.x < PLAYFIELD_WIDTH
    }
}

/// Per-frame ambient audio cues, one per obstacle kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaneCues {
    pub ground: bool,
    pub air: bool,
}

impl LaneCues {
    pub fn set(&mut self, kind: ObstacleKind) {
        match kind {
            ObstacleKind::Ground => self.ground = true,
            ObstacleKind::Air => self.air = true,
        }
    }
}

/// Notifications queued by the session for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session created and waiting for the first start
    Ready,
    /// A run began (`run` counts starts, from 1)
    Started { run: u32 },
    Jumped,
    ObstacleSpawned { kind: ObstacleKind },
    ScoreChanged { score: u32 },
    SpeedIncreased { speed: f32 },
    /// Emitted exactly once per run
    GameOver { score: u32 },
}
