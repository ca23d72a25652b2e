//! Output contracts between the simulation and the presentation layer
//!
//! The session never talks to the DOM, the GPU or the audio device. Each
//! frame the shell drains the session's events and hands them, together
//! with a frame snapshot, to these sinks.

use crate::sim::{FrameSnapshot, GameEvent, LaneCues, ObstacleKind, Session};

/// Draws a frame. Failures are the sink's problem; the core never waits.
pub trait RenderSink {
    fn draw_frame(&mut self, frame: &FrameSnapshot);
}

/// Ambient and one-shot audio cues. Playback failures must be swallowed.
pub trait AudioSink {
    /// Start/stop the looping cue for each obstacle kind
    fn set_lane_cues(&mut self, cues: LaneCues);
    /// One-shot cue when a run ends
    fn play_collision(&mut self);
    /// One-shot cue when the player leaves the ground
    fn play_jump(&mut self) {}
}

/// Presentational text and overlay updates
pub trait UiSink {
    fn on_ready(&mut self);
    fn on_started(&mut self) {}
    fn on_score_changed(&mut self, score: u32);
    fn on_game_over(&mut self, score: u32);
    fn on_obstacle_spawned(&mut self, _kind: ObstacleKind) {}
    fn on_speed_increased(&mut self, _speed: f32) {}
}

impl<R: RenderSink> RenderSink for Option<R> {
    fn draw_frame(&mut self, frame: &FrameSnapshot) {
        if let Some(sink) = self {
            sink.draw_frame(frame);
        }
    }
}

/// Route queued session events to the audio and UI sinks
pub fn dispatch_events(events: &[GameEvent], audio: &mut impl AudioSink, ui: &mut impl UiSink) {
    for event in events {
        match *event {
            GameEvent::Ready => ui.on_ready(),
            GameEvent::Started { .. } => ui.on_started(),
            GameEvent::ScoreChanged { score } => ui.on_score_changed(score),
            GameEvent::GameOver { score } => {
                audio.set_lane_cues(LaneCues::default());
                audio.play_collision();
                ui.on_game_over(score);
            }
            GameEvent::Jumped => audio.play_jump(),
            GameEvent::ObstacleSpawned { kind } => ui.on_obstacle_spawned(kind),
            GameEvent::SpeedIncreased { speed } => ui.on_speed_increased(speed),
        }
    }
}

/// Hand one frame of output to the sinks
pub fn present(
    session: &mut Session,
    render: &mut impl RenderSink,
    audio: &mut impl AudioSink,
    ui: &mut impl UiSink,
) {
    let events = session.drain_events();
    dispatch_events(&events, audio, ui);
    if session.is_playing() {
        audio.set_lane_cues(session.lane_cues);
    }
    render.draw_frame(&session.snapshot());
}

/// Sink that reports everything through `log`; used by the headless runner
#[derive(Debug, Default)]
pub struct LogSink {
    pub frames: u64,
    cues: LaneCues,
}

impl RenderSink for LogSink {
    fn draw_frame(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        log::trace!(
            "frame {}: y={:.1} obstacles={} speed={}",
            self.frames,
            frame.player.rect.min.y,
            frame.obstacles.len(),
            frame.speed
        );
    }
}

impl AudioSink for LogSink {
    fn set_lane_cues(&mut self, cues: LaneCues) {
        if cues != self.cues {
            log::debug!("lane cues: ground={} air={}", cues.ground, cues.air);
            self.cues = cues;
        }
    }

    fn play_collision(&mut self) {
        log::debug!("collision cue");
    }

    fn play_jump(&mut self) {
        log::trace!("jump cue");
    }
}

impl UiSink for LogSink {
    fn on_ready(&mut self) {
        log::info!("Ready?");
    }

    fn on_score_changed(&mut self, score: u32) {
        log::debug!("score {score}");
    }

    fn on_game_over(&mut self, score: u32) {
        log::info!("Game over - score {score}");
    }

    fn on_obstacle_spawned(&mut self, kind: ObstacleKind) {
        log::debug!("spawned {kind:?} obstacle");
    }

    fn on_speed_increased(&mut self, speed: f32) {
        log::info!("Speed up: {speed}");
    }
}
