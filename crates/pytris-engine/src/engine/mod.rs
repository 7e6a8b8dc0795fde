//! Game rules built on top of the core data structures.
//!
//! - [`GameField`] - The board, the falling piece, the next-up queue and the hold slot
//! - [`GameSession`] - Main menu, gravity, pause and game over around a [`GameField`]
//! - [`GameStats`] - Score, cleared rows and level
//! - [`GameConfig`] - Board size, spawn point and gravity speed
//! - [`NextQueue`] / [`PieceSeed`] - Deterministic random piece generation
//! - [`Holder`] - The single-slot hold store
//!
//! # Turn flow
//!
//! 1. The front of the next-up queue spawns at the spawn point
//! 2. The player moves, rotates or holds the falling piece while gravity pulls it down
//! 3. A piece that cannot fall further is frozen into the board
//! 4. Full rows spanned by the frozen piece are cleared
//! 5. Repeat until a piece freezes above the board or spawns onto a filled cell

pub use self::{
    config::*, game_field::*, game_session::*, game_stats::*, holder::*, next_queue::*,
};

mod config;
mod game_field;
mod game_session;
mod game_stats;
mod holder;
mod next_queue;
