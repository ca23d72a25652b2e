//! Score and difficulty progression

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Score counter and the scroll speed it drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    /// Shared scroll speed for every obstacle (units/frame)
    pub speed: f32,
    /// Last score that bumped the speed; guards against double bumps
    pub last_milestone: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            speed: BASE_SPEED,
            last_milestone: 0,
        }
    }
}

impl Scoreboard {
    /// Count one obstacle that scrolled off screen.
    ///
    /// Returns the new speed if this point landed on a fresh milestone.
    pub fn on_obstacle_passed(&mut self) -> Option<f32> {
        self.score += 1;
        if self.score.is_multiple_of(SPEED_STEP_SCORE) && self.score != self.last_milestone {
            self.speed += SPEED_INCREMENT;
            self.last_milestone = self.score;
            log::debug!("Milestone {}: speed {}", self.score, self.speed);
            return Some(self.speed);
        }
        None
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_bumps_at_milestones() {
        let mut board = Scoreboard::default();
        let bumps: Vec<u32> = (0..20)
            .filter_map(|_| board.on_obstacle_passed().map(|_| board.score))
            .collect();
        assert_eq!(bumps, vec![5, 10, 15, 20]);
        assert_eq!(board.speed, BASE_SPEED + 4.0 * SPEED_INCREMENT);
    }

    #[test]
    fn test_milestone_guard() {
        let mut board = Scoreboard::default();
        for _ in 0..5 {
            board.on_obstacle_passed();
        }
        assert_eq!(board.last_milestone, 5);
        let speed = board.speed;

        // Re-entering the same score must not bump again
        board.score = 4;
        assert_eq!(board.on_obstacle_passed(), None);
        assert_eq!(board.speed, speed);
    }

    #[test]
    fn test_reset() {
        let mut board = Scoreboard::default();
        for _ in 0..7 {
            board.on_obstacle_passed();
        }
        board.reset();
        assert_eq!(board, Scoreboard::default());
    }

    proptest! {
        #[test]
        fn prop_speed_tracks_milestones(passes in 0u32..200) {
            let mut board = Scoreboard::default();
            let mut last_score = 0;
            let mut last_speed = board.speed;
            for _ in 0..passes {
                board.on_obstacle_passed();
                prop_assert!(board.score > last_score);
                prop_assert!(board.speed >= last_speed);
                last_score = board.score;
                last_speed = board.speed;
            }
            let expected = BASE_SPEED + (passes / SPEED_STEP_SCORE) as f32 * SPEED_INCREMENT;
            prop_assert!((board.speed - expected).abs() < 1e-4);
        }
    }
}
