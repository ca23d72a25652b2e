//! Run-scoped timers
//!
//! The frame loop and the spawner only exist while a run is active. The
//! session arms them on `start()` and drops them on `start()`/`game_over()`,
//! so a stale callback has nothing left to fire.

/// Fixed wall-clock interval, advanced by elapsed milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    interval_ms: f64,
    elapsed_ms: f64,
}

impl IntervalTimer {
    pub fn new(interval_ms: f64) -> Self {
        debug_assert!(interval_ms > 0.0);
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Returns true when the interval elapsed.
    ///
    /// Fires at most once per call; a long stall (background tab) does not
    /// replay the missed intervals.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms %= self.interval_ms;
            true
        } else {
            false
        }
    }
}

/// Handle for the per-frame step of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLoop {
    pub frames: u64,
}

/// Timer handles owned by the session state machine
#[derive(Debug, Clone, Default)]
pub struct RunTimers {
    pub frame_loop: Option<FrameLoop>,
    pub spawner: Option<IntervalTimer>,
}

impl RunTimers {
    pub fn arm(&mut self, spawn_interval_ms: f64) {
        self.frame_loop = Some(FrameLoop::default());
        self.spawner = Some(IntervalTimer::new(spawn_interval_ms));
    }

    pub fn cancel(&mut self) {
        self.frame_loop = None;
        self.spawner = None;
    }

    pub fn is_armed(&self) -> bool {
        self.frame_loop.is_some()
    }
}
