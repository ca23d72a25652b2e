//! Shape generation for 2D primitives
//!
//! All positions are in playfield units (y down); the pipeline maps them to
//! clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{FrameSnapshot, ObstacleKind, Rect};

/// Thickness of the floor line
const GROUND_LINE_WIDTH: f32 = 2.0;
/// Depth of the decorative floor band below the line
const FLOOR_DEPTH: f32 = 100.0;
/// Shadow ellipse radii and drop below the player's feet
const SHADOW_RADII: Vec2 = Vec2::new(20.0, 5.0);
const SHADOW_DROP: f32 = 5.0;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(r, color, color)
}

/// Generate vertices for a rectangle with a vertical color gradient
pub fn gradient_rect(r: &Rect, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (r.min, r.max());
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Scene options that don't come from the simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneStyle {
    /// Flat sky and no shadow
    pub reduced_motion: bool,
}

/// Build the full frame, back to front
pub fn scene(frame: &FrameSnapshot, style: SceneStyle) -> Vec<Vertex> {
    let field = frame.playfield;
    let mut vertices = Vec::with_capacity(64 + frame.obstacles.len() * 6);

    // Sky
    let sky = Rect {
        min: Vec2::ZERO,
        size: field,
    };
    if style.reduced_motion {
        vertices.extend(rect(&sky, colors::SKY_BOTTOM));
    } else {
        vertices.extend(gradient_rect(&sky, colors::SKY_TOP, colors::SKY_BOTTOM));
    }

    // Floor band, starting just above the line
    let floor = Rect::new(0.0, frame.ground_line_y - 5.0, field.x, FLOOR_DEPTH);
    vertices.extend(rect(&floor, colors::FLOOR));

    // Player shadow stays on the floor while the player jumps
    let player = &frame.player.rect;
    if !style.reduced_motion {
        let center = Vec2::new(player.center().x, frame.ground_line_y + SHADOW_DROP);
        vertices.extend(ellipse(center, SHADOW_RADII, colors::SHADOW, 16));
    }

    vertices.extend(rect(player, colors::PLAYER));

    for obstacle in &frame.obstacles {
        let color = match obstacle.kind {
            ObstacleKind::Ground => colors::OBSTACLE_GROUND,
            ObstacleKind::Air => colors::OBSTACLE_AIR,
        };
        vertices.extend(rect(&obstacle.rect, color));
    }

    let line = Rect::new(
        0.0,
        frame.ground_line_y - GROUND_LINE_WIDTH / 2.0,
        field.x,
        GROUND_LINE_WIDTH,
    );
    vertices.extend(rect(&line, colors::GROUND_LINE));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Session;

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let vertices = rect(&r, colors::PLAYER);
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_ellipse_stays_within_radii() {
        let vertices = ellipse(Vec2::new(100.0, 50.0), Vec2::new(20.0, 5.0), colors::SHADOW, 12);
        assert_eq!(vertices.len(), 36);
        for v in vertices {
            assert!((v.position[0] - 100.0).abs() <= 20.0 + 1e-4);
            assert!((v.position[1] - 50.0).abs() <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_scene_draws_each_obstacle() {
        let mut session = Session::new(1);
        session.start();
        let empty = scene(&session.snapshot(), SceneStyle::default()).len();

        session.spawn_with_roll(0.0);
        let frame = session.snapshot();
        let vertices = scene(&frame, SceneStyle::default());
        assert_eq!(vertices.len(), empty + 6);
        assert!(vertices.iter().any(|v| v.color == colors::OBSTACLE_GROUND));
    }

    #[test]
    fn test_reduced_motion_drops_shadow() {
        let session = Session::new(1);
        let frame = session.snapshot();
        let full = scene(&frame, SceneStyle::default());
        let reduced = scene(
            &frame,
            SceneStyle {
                reduced_motion: true,
            },
        );
        assert_eq!(full.len() - reduced.len(), 16 * 3);
        assert!(!reduced.iter().any(|v| v.color == colors::SHADOW));
    }
}
