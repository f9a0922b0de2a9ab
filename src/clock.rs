//! Frame timing.

use std::time::{Duration, Instant};

/// Interval between FPS log lines.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Measures per-frame delta time and total running time.
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    frames_since_report: u32,
    last_report: Instant,
}

/// Timing information for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last_frame: now,
            frames_since_report: 0,
            last_report: now,
        }
    }

    /// Advances the clock to `now`.
    ///
    /// Returns the frame time and, about once per second, the average frame rate since the last
    /// report.
    pub fn tick_at(&mut self, now: Instant) -> (FrameTime, Option<f32>) {
        let time = FrameTime {
            delta: now.saturating_duration_since(self.last_frame).as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
        };
        self.last_frame = now;
        self.frames_since_report += 1;

        let since_report = now.saturating_duration_since(self.last_report);
        let fps = if since_report >= REPORT_INTERVAL {
            let fps = self.frames_since_report as f32 / since_report.as_secs_f32();
            self.frames_since_report = 0;
            self.last_report = now;
            Some(fps)
        } else {
            None
        };
        (time, fps)
    }

    /// Advances the clock to the current instant, logging the frame rate when due.
    pub fn tick(&mut self) -> FrameTime {
        let (time, fps) = self.tick_at(Instant::now());
        log::trace!("frame took {:.2} ms", time.delta * 1000.0);
        if let Some(fps) = fps {
            log::debug!("{fps:.1} fps");
        }
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
