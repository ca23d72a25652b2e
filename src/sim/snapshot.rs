//! Read-only view of a frame for the render sink

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{GamePhase, ObstacleKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub playfield: Vec2,
    /// y of the floor line
    pub ground_line_y: f32,
    pub player: PlayerView,
    /// In spawn order
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub speed: f32,
}
