use std::time::{Duration, Instant};

/// Paces a loop to a fixed number of frames per second.
///
/// The clock remembers when the next frame is due. A frame that runs late does
/// not cause a burst of catch-up frames; the schedule restarts from the late
/// frame instead.
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use pytris_runtime::FrameClock;
///
/// let start = Instant::now();
/// let mut clock = FrameClock::from_rate(50.0, start);
/// assert_eq!(clock.frame_interval(), Duration::from_millis(20));
///
/// // 5ms of work leaves 15ms to sleep
/// let wait = clock.tick(start + Duration::from_millis(5));
/// assert_eq!(wait, Duration::from_millis(15));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame_interval: Duration,
    next_frame: Instant,
}

impl FrameClock {
    /// Creates a clock whose first frame ends one interval after `now`.
    #[must_use]
    pub fn new(frame_interval: Duration, now: Instant) -> Self {
        Self {
            frame_interval,
            next_frame: now + frame_interval,
        }
    }

    /// Creates a clock running at `rate` frames per second.
    ///
    /// A non-positive or non-finite rate runs frames back to back.
    #[must_use]
    pub fn from_rate(rate: f64, now: Instant) -> Self {
        let interval = if rate.is_finite() && rate > 0.0 {
            Duration::from_secs_f64(1.0 / rate)
        } else {
            Duration::ZERO
        };
        Self::new(interval, now)
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Ends the current frame at `now`.
    ///
    /// Returns how long to sleep before starting the next frame.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let wait = self.next_frame.saturating_duration_since(now);
        self.next_frame = if wait.is_zero() {
            now + self.frame_interval
        } else {
            self.next_frame + self.frame_interval
        };
        wait
    }
}
