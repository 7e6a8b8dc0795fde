use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for applications driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first frame. Use this to configure the frame rate.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the loop should stop.
    ///
    /// Checked after the events of a frame are handled and again after each update.
    fn should_exit(&self) -> bool;

    /// Handles one terminal event (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances the application by one frame.
    ///
    /// [`Runtime::now_millis`] gives the current time.
    fn update(&mut self, runtime: &mut Runtime);

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);
}
