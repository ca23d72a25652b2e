//! Obstacle spawning, scrolling and pruning
//!
//! The session hands the obstacle collection in explicitly; nothing here
//! keeps state of its own.

use super::state::{LaneCues, Obstacle, ObstacleKind};
use crate::consts::*;

/// Map a uniform draw in [0, 1) to an obstacle kind
#[inline]
pub fn kind_for_roll(roll: f32) -> ObstacleKind {
    if roll < P_GROUND {
        ObstacleKind::Ground
    } else {
        ObstacleKind::Air
    }
}

/// Whether the spawn policy allows a new obstacle right now
pub fn can_spawn(obstacles: &[Obstacle]) -> bool {
    if obstacles.len() > MAX_OBSTACLES {
        return false;
    }
    let threshold = PLAYFIELD_WIDTH - MIN_SPAWN_DISTANCE;
    !obstacles.iter().any(|o| o.pos.x > threshold)
}

/// Spawn at the right edge of the playfield if the policy allows it
pub fn try_spawn(obstacles: &mut Vec<Obstacle>, roll: f32, id: u32) -> Option<ObstacleKind> {
    if !can_spawn(obstacles) {
        return None;
    }
    let kind = kind_for_roll(roll);
    obstacles.push(Obstacle::spawn(id, kind, PLAYFIELD_WIDTH));
    Some(kind)
}

/// Scroll every obstacle left by the session speed
pub fn advance(obstacles: &mut [Obstacle], speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x -= speed;
    }
}

/// Remove obstacles that scrolled fully off the left edge.
///
/// Returns how many were removed; each one is worth one point.
pub fn prune(obstacles: &mut Vec<Obstacle>) -> u32 {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_offscreen());
    (before - obstacles.len()) as u32
}

/// Which obstacle kinds are currently on screen
pub fn visibility_flags(obstacles: &[Obstacle]) -> LaneCues {
    let mut cues = LaneCues::default();
    for obstacle in obstacles.iter().filter(|o| o.is_visible()) {
        cues.set(obstacle.kind);
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_split() {
        assert_eq!(kind_for_roll(0.0), ObstacleKind::Ground);
        assert_eq!(kind_for_roll(P_GROUND - 0.01), ObstacleKind::Ground);
        assert_eq!(kind_for_roll(P_GROUND), ObstacleKind::Air);
        assert_eq!(kind_for_roll(0.99), ObstacleKind::Air);
    }

    #[test]
    fn test_spawn_geometry() {
        let mut obstacles = Vec::new();
        assert_eq!(try_spawn(&mut obstacles, 0.0, 1), Some(ObstacleKind::Ground));
        let ground = &obstacles[0];
        assert_eq!(ground.pos.x, PLAYFIELD_WIDTH);
        // Bottom sits on the floor line
        assert_eq!(ground.pos.y + ground.size.y, FLOOR_Y);

        obstacles.clear();
        assert_eq!(try_spawn(&mut obstacles, 0.9, 2), Some(ObstacleKind::Air));
        assert_eq!(obstacles[0].pos.y, GROUND_Y - AIR_CLEARANCE);
        assert!(obstacles[0].pos.y + obstacles[0].size.y < GROUND_Y);
    }

    #[test]
    fn test_spawn_blocked_until_obstacle_scrolls_past_threshold() {
        let mut obstacles = Vec::new();
        assert!(try_spawn(&mut obstacles, 0.0, 1).is_some());
        assert!(try_spawn(&mut obstacles, 0.0, 2).is_none());

        // Still right of width - 200
        obstacles[0].pos.x = PLAYFIELD_WIDTH - MIN_SPAWN_DISTANCE + 1.0;
        assert!(try_spawn(&mut obstacles, 0.0, 2).is_none());

        // Exactly on the threshold is no longer "too close"
        obstacles[0].pos.x = PLAYFIELD_WIDTH - MIN_SPAWN_DISTANCE;
        assert!(try_spawn(&mut obstacles, 0.0, 2).is_some());
        assert_eq!(obstacles.len(), 2);
    }

    #[test]
    fn test_spawn_cap() {
        let mut obstacles: Vec<Obstacle> = (0..=MAX_OBSTACLES as u32)
            .map(|i| Obstacle::spawn(i, ObstacleKind::Air, 100.0 * i as f32))
            .collect();
        assert_eq!(obstacles.len(), MAX_OBSTACLES + 1);
        assert!(try_spawn(&mut obstacles, 0.5, 99).is_none());

        obstacles.pop();
        assert!(try_spawn(&mut obstacles, 0.5, 99).is_some());
    }

    #[test]
    fn test_prune_counts_each_once() {
        let mut obstacles = vec![
            Obstacle::spawn(1, ObstacleKind::Ground, -49.0),
            Obstacle::spawn(2, ObstacleKind::Air, 300.0),
        ];
        assert_eq!(prune(&mut obstacles), 0);

        advance(&mut obstacles, 6.0);
        assert_eq!(prune(&mut obstacles), 1);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
        assert_eq!(prune(&mut obstacles), 0);
    }

    #[test]
    fn test_right_edge_at_zero_is_not_pruned() {
        let mut obstacles = vec![Obstacle::spawn(1, ObstacleKind::Ground, -OBSTACLE_WIDTH)];
        assert_eq!(prune(&mut obstacles), 0);
    }

    #[test]
    fn test_visibility_flags() {
        let mut obstacles = vec![Obstacle::spawn(1, ObstacleKind::Ground, PLAYFIELD_WIDTH)];
        // Left edge at the right border is not yet visible
        assert_eq!(visibility_flags(&obstacles), LaneCues::default());

        advance(&mut obstacles, 6.0);
        let cues = visibility_flags(&obstacles);
        assert!(cues.ground);
        assert!(!cues.air);

        obstacles.push(Obstacle::spawn(2, ObstacleKind::Air, 500.0));
        assert_eq!(
            visibility_flags(&obstacles),
            LaneCues {
                ground: true,
                air: true
            }
        );
    }
}
