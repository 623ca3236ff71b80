use std::time::Instant;

use crate::consts::FPS_SAMPLE_SECS;

/// Source of frame timing.
pub trait Clock {
    /// Seconds since the previous call (or since creation, for the first).
    fn elapsed_secs(&mut self) -> f64;
}

pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        elapsed
    }
}

/// Reports the same step every call.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub step: f64,
}

impl FixedClock {
    pub fn new(step: f64) -> Self {
        FixedClock { step }
    }
}

impl Clock for FixedClock {
    fn elapsed_secs(&mut self) -> f64 {
        self.step
    }
}

/// Frame rate sampled at most once per second. Between samples the last
/// value is held, so readers see a stepped rate.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f64,
    fps: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one frame that took `dt` seconds and returns the current rate.
    pub fn tick(&mut self, dt: f64) -> f64 {
        self.frames += 1;
        self.elapsed += dt;

        if self.elapsed >= FPS_SAMPLE_SECS {
            self.fps = self.frames as f64 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }

        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}
