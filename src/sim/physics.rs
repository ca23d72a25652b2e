//! Vertical player physics
//!
//! Integration is per display frame: constants are in units/frame and
//! units/frame², never scaled by elapsed time.

use super::state::Player;
use crate::consts::*;

impl Player {
    /// Advance one frame. Never fails; landing clamps to the ground.
    pub fn step(&mut self) {
        if !self.grounded {
            self.vel_y += GRAVITY;
            self.pos.y += self.vel_y;
        }

        if self.pos.y > GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vel_y = 0.0;
            self.grounded = true;
        }
    }

    /// Jump if standing and outside the debounce window.
    ///
    /// Requests inside the window are dropped, not queued.
    pub fn try_jump(&mut self, now_ms: f64) -> bool {
        if !self.grounded || now_ms < self.jump_ready_at_ms {
            return false;
        }
        self.vel_y = -JUMP_FORCE;
        self.grounded = false;
        self.jump_ready_at_ms = now_ms + JUMP_COOLDOWN_MS;
        true
    }

    /// Frames spent airborne by a jump from the ground
    pub fn airtime_frames() -> u32 {
        let mut player = Player::default();
        player.try_jump(0.0);
        let mut frames = 0;
        while !player.grounded {
            player.step();
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grounded_player_stays_put() {
        let mut player = Player::default();
        for _ in 0..10 {
            player.step();
        }
        assert_eq!(player.pos.y, GROUND_Y);
        assert!(player.grounded);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_jump_arc_lands_on_ground() {
        let mut player = Player::default();
        assert!(player.try_jump(0.0));
        assert_eq!(player.vel_y, -JUMP_FORCE);
        assert!(!player.grounded);

        player.step();
        assert!(player.pos.y < GROUND_Y);

        let mut apex = player.pos.y;
        while !player.grounded {
            player.step();
            apex = apex.min(player.pos.y);
        }
        assert_eq!(player.pos.y, GROUND_Y);
        assert_eq!(player.vel_y, 0.0);
        // v²/2g ≈ 140 units of height, minus the discrete-step shortfall
        assert!(apex < GROUND_Y - 120.0 && apex > GROUND_Y - 145.0);
    }

    #[test]
    fn test_airborne_jump_is_ignored() {
        let mut player = Player::default();
        assert!(player.try_jump(0.0));
        player.step();
        let vel = player.vel_y;
        assert!(!player.try_jump(10_000.0));
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_debounce_window() {
        let mut player = Player::default();
        assert!(player.try_jump(1000.0));
        while !player.grounded {
            player.step();
        }
        // Landed, but still inside the window
        player.jump_ready_at_ms = 1000.0 + JUMP_COOLDOWN_MS;
        assert!(!player.try_jump(1050.0));
        assert!(player.try_jump(1000.0 + JUMP_COOLDOWN_MS));
    }

    #[test]
    fn test_airtime_is_finite() {
        let frames = Player::airtime_frames();
        assert!((36..=40).contains(&frames), "airtime {frames}");
    }

    proptest! {
        #[test]
        fn prop_never_below_ground(jumps in proptest::collection::vec(any::<bool>(), 0..400)) {
            let mut player = Player::default();
            let mut now = 0.0;
            for jump in jumps {
                if jump {
                    player.try_jump(now);
                }
                player.step();
                now += 16.0;
                prop_assert!(player.pos.y <= GROUND_Y);
                prop_assert_eq!(player.grounded, player.pos.y == GROUND_Y && player.vel_y == 0.0);
            }
        }
    }
}
