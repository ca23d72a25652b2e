//! Per-frame driver
//!
//! Called once per display refresh with the wall-clock time since the last
//! call. Jump input is applied first, then the clock (spawner), then the
//! simulation step.

use super::collision::Rect;
use super::session::Session;
use super::state::{ObstacleKind, Player};
use crate::consts::HITBOX_PADDING;

/// Frames of lead the autopilot leaves before a ground obstacle arrives
const JUMP_LEAD_FRAMES: f32 = 8.0;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested this frame (key/touch/click)
    pub jump: bool,
    /// Demo mode - jump automatically over ground obstacles
    pub autopilot: bool,
}

/// Advance the session by one display frame
pub fn tick(session: &mut Session, input: &TickInput, dt_ms: f64) {
    if session.is_playing() && (input.jump || (input.autopilot && autopilot_wants_jump(session))) {
        session.request_jump();
    }

    session.advance_clock(dt_ms);

    if session.is_playing() {
        session.step();
    }
}

/// Jump when a ground obstacle is about to reach the player, unless an air
/// obstacle would be overhead during the arc.
pub fn autopilot_wants_jump(session: &Session) -> bool {
    if !session.player.grounded {
        return false;
    }

    let speed = session.speed();
    let player = session.player.rect().inset(HITBOX_PADDING);
    let reach = player.max().x;
    let padded = |rect: Rect| rect.inset(HITBOX_PADDING);

    let ground_incoming = session
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Ground)
        .any(|o| {
            let gap = padded(o.rect()).min.x - reach;
            gap > 0.0 && gap <= speed * JUMP_LEAD_FRAMES
        });
    if !ground_incoming {
        return false;
    }

    // Anything overhead before the jump lands is a threat
    let danger_end = reach + speed * Player::airtime_frames() as f32;
    !session
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Air)
        .any(|o| {
            let r = padded(o.rect());
            r.max().x > player.min.x && r.min.x < danger_end
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{GamePhase, Obstacle};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut session = Session::new(1);
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &input, FRAME_MS);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(session.player.grounded);
        assert_eq!(session.frames(), 0);
    }

    #[test]
    fn test_tick_jump_input() {
        let mut session = Session::new(1);
        session.start();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &input, FRAME_MS);
        assert!(!session.player.grounded);
        assert!(session.player.pos.y < GROUND_Y);
        assert_eq!(session.frames(), 1);
    }

    #[test]
    fn test_tick_spawns_on_wall_clock() {
        let mut session = Session::new(1);
        session.start();
        let input = TickInput::default();
        for _ in 0..100 {
            tick(&mut session, &input, FRAME_MS);
        }
        // ~1667 ms elapsed: exactly one spawn, already scrolling
        assert_eq!(session.obstacles.len(), 1);
        assert!(session.obstacles[0].pos.x < PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_autopilot_clears_ground_obstacle() {
        let mut session = Session::new(1);
        session.start();
        session.spawn_with_roll(0.0);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        // Zero dt keeps the spawner quiet
        for _ in 0..250 {
            tick(&mut session, &input, 0.0);
        }
        assert!(session.is_playing());
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_autopilot_ignores_air_obstacles() {
        let mut session = Session::new(1);
        session.start();
        session.obstacles.push(Obstacle::spawn(1, ObstacleKind::Air, 170.0));
        assert!(!autopilot_wants_jump(&session));
    }

    #[test]
    fn test_autopilot_holds_jump_under_air_obstacle() {
        let mut session = Session::new(1);
        session.start();
        session.obstacles.push(Obstacle::spawn(1, ObstacleKind::Ground, 170.0));
        assert!(autopilot_wants_jump(&session));

        session.obstacles.push(Obstacle::spawn(2, ObstacleKind::Air, 250.0));
        assert!(!autopilot_wants_jump(&session));
    }

    #[test]
    fn test_autopilot_danger_window_spans_whole_jump() {
        let mut session = Session::new(1);
        session.start();
        session.obstacles.push(Obstacle::spawn(1, ObstacleKind::Ground, 170.0));

        // Padded left edge 34 frames of scrolling past the player's reach
        let reach = session.player.rect().inset(HITBOX_PADDING).max().x;
        let x = reach + BASE_SPEED * 34.0 - HITBOX_PADDING;
        assert!(34 < Player::airtime_frames());
        session.obstacles.push(Obstacle::spawn(2, ObstacleKind::Air, x));
        assert!(!autopilot_wants_jump(&session));

        // Past the landing point it no longer matters
        let landed = Player::airtime_frames() as f32 + 1.0;
        session.obstacles[1].pos.x = reach + BASE_SPEED * landed - HITBOX_PADDING;
        assert!(autopilot_wants_jump(&session));
    }
}
