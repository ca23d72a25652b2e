//! Session state machine
//!
//! Idle → Playing → GameOver → (start) → Playing. The session owns the
//! player, the obstacles, the scoreboard and the run timers; `start()` and
//! `game_over()` are the only places timers are armed or cancelled.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::first_collision;
use super::obstacles;
use super::scoring::Scoreboard;
use super::snapshot::{FrameSnapshot, ObstacleView, PlayerView};
use super::state::{GameEvent, GamePhase, LaneCues, Obstacle, ObstacleKind, Player};
use super::timer::RunTimers;
use crate::consts::*;

/// One game session, reused across runs
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the spawn RNG was created from
    pub seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub scoreboard: Scoreboard,
    /// Ambient cues computed by the last step
    pub lane_cues: LaneCues,
    /// Wall-clock time fed in through `advance_clock`
    pub clock_ms: f64,
    /// Number of runs started
    pub run: u32,
    timers: RunTimers,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            player: Player::default(),
            obstacles: Vec::new(),
            scoreboard: Scoreboard::default(),
            lane_cues: LaneCues::default(),
            clock_ms: 0.0,
            run: 0,
            timers: RunTimers::default(),
            events: vec![GameEvent::Ready],
            next_id: 1,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn speed(&self) -> f32 {
        self.scoreboard.speed
    }

    /// Frames stepped in the current run (0 when no run is active)
    pub fn frames(&self) -> u64 {
        self.timers.frame_loop.as_ref().map_or(0, |l| l.frames)
    }

    /// Begin a new run from any phase.
    ///
    /// Timers from the previous run are cancelled before anything is reset.
    pub fn start(&mut self) {
        self.timers.cancel();

        self.scoreboard.reset();
        self.obstacles.clear();
        self.player = Player::default();
        self.lane_cues = LaneCues::default();
        // Debounce is relative to the session clock, which keeps running
        self.player.jump_ready_at_ms = self.clock_ms;

        self.run += 1;
        self.phase = GamePhase::Playing;
        self.timers.arm(SPAWN_INTERVAL_MS);

        log::info!("Run {} started (seed {})", self.run, self.seed);
        self.events.push(GameEvent::Started { run: self.run });
        self.events.push(GameEvent::ScoreChanged { score: 0 });
    }

    /// End the current run. A no-op unless a run is in progress.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            if self.phase == GamePhase::Idle {
                log::warn!("game_over() called before the first run");
            }
            return;
        }

        self.timers.cancel();
        self.phase = GamePhase::GameOver;
        self.lane_cues = LaneCues::default();

        log::info!("Run {} over: score {}", self.run, self.scoreboard.score);
        self.events.push(GameEvent::GameOver {
            score: self.scoreboard.score,
        });
    }

    /// Abstract jump input. Ignored unless playing, grounded and outside
    /// the debounce window.
    pub fn request_jump(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let jumped = self.player.try_jump(self.clock_ms);
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    /// Feed elapsed wall-clock time; drives the spawner independently of
    /// the frame rate.
    pub fn advance_clock(&mut self, dt_ms: f64) {
        self.clock_ms += dt_ms.max(0.0);

        let fired = self
            .timers
            .spawner
            .as_mut()
            .is_some_and(|spawner| spawner.advance(dt_ms));
        if fired {
            self.spawn_obstacle();
        }
    }

    /// Spawner callback: draw a kind and try to spawn
    pub fn spawn_obstacle(&mut self) -> Option<ObstacleKind> {
        let roll: f32 = self.rng.random();
        self.spawn_with_roll(roll)
    }

    /// Spawn with an explicit uniform draw in [0, 1)
    pub fn spawn_with_roll(&mut self, roll: f32) -> Option<ObstacleKind> {
        if !self.is_playing() {
            return None;
        }
        let kind = obstacles::try_spawn(&mut self.obstacles, roll, self.next_id)?;
        self.next_id += 1;
        self.events.push(GameEvent::ObstacleSpawned { kind });
        Some(kind)
    }

    /// One display frame of simulation
    pub fn step(&mut self) {
        let Some(frame_loop) = self.timers.frame_loop.as_mut() else {
            log::warn!("step() without an active run ({:?})", self.phase);
            return;
        };
        frame_loop.frames += 1;

        self.player.step();

        obstacles::advance(&mut self.obstacles, self.scoreboard.speed);
        let passed = obstacles::prune(&mut self.obstacles);
        for _ in 0..passed {
            let bumped = self.scoreboard.on_obstacle_passed();
            self.events.push(GameEvent::ScoreChanged {
                score: self.scoreboard.score,
            });
            if let Some(speed) = bumped {
                self.events.push(GameEvent::SpeedIncreased { speed });
            }
        }

        if first_collision(&self.player.rect(), &self.obstacles, HITBOX_PADDING).is_some() {
            self.game_over();
            return;
        }

        self.lane_cues = obstacles::visibility_flags(&self.obstacles);
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            playfield: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            ground_line_y: FLOOR_Y,
            player: PlayerView {
                rect: self.player.rect(),
                grounded: self.player.grounded,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    rect: o.rect(),
                    kind: o.kind,
                })
                .collect(),
            score: self.scoreboard.score,
            speed: self.scoreboard.speed,
        }
    }
}
