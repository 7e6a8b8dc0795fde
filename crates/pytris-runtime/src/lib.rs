//! Fixed frame rate terminal loop.
//!
//! Every frame the [`Runtime`] hands all pending terminal events to the [`App`],
//! updates it once, draws it once and then sleeps until the next frame is due.

pub use self::{app::App, frame_clock::FrameClock, runtime::Runtime};

mod app;
mod frame_clock;
mod runtime;
