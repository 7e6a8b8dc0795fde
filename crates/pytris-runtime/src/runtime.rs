use std::{
    io, thread,
    time::{Duration, Instant},
};

use crossterm::event;
use tracing::debug;

use crate::{App, FrameClock};

const DEFAULT_FRAME_RATE: f64 = 60.0;

/// Runs an [`App`] at a fixed frame rate.
#[derive(Debug)]
pub struct Runtime {
    started: Instant,
    clock: FrameClock,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a runtime at 60 frames per second.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            clock: FrameClock::from_rate(DEFAULT_FRAME_RATE, now),
        }
    }

    /// Sets the frame rate (frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.clock = FrameClock::from_rate(rate, Instant::now());
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.clock.frame_interval()
    }

    /// Milliseconds since the runtime was created.
    #[must_use]
    pub fn now_millis(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Runs the application until [`App::should_exit`] returns true.
    ///
    /// Each frame:
    ///
    /// 1. every pending terminal event is passed to `app.handle_event()` without blocking
    /// 2. `app.update()` is called once
    /// 3. `app.draw()` renders one frame
    /// 4. the loop sleeps until the next frame is due
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);
        debug!(interval = ?self.frame_interval(), "starting frame loop");

        ratatui::run(|terminal| {
            while !app.should_exit() {
                while event::poll(Duration::ZERO)? {
                    app.handle_event(&mut self, event::read()?);
                }
                if app.should_exit() {
                    break;
                }
                app.update(&mut self);
                terminal.draw(|f| app.draw(f))?;
                let wait = self.clock.tick(Instant::now());
                if !wait.is_zero() {
                    thread::sleep(wait);
                }
            }
            Ok(())
        })
    }
}
