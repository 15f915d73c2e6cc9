//! Frame-rate cap for the native loop

use std::time::{Duration, Instant};

/// Monotonic clock that paces the loop to a fixed frame rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frame: Duration,
    next_deadline: Instant,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        let start = Instant::now();
        let frame = Self::frame_duration(frame_rate);
        Self {
            start,
            frame,
            next_deadline: start + frame,
        }
    }

    fn frame_duration(frame_rate: u32) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(frame_rate.max(1)))
    }

    /// Milliseconds since the clock was created
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) {
        self.frame = Self::frame_duration(frame_rate);
        self.next_deadline = Instant::now() + self.frame;
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Sleep until the next frame is due
    ///
    /// A loop that has fallen behind does not try to catch up; the schedule
    /// restarts from now.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
            self.next_deadline += self.frame;
        } else {
            self.next_deadline = now + self.frame;
        }
    }
}
