pub use self::{board::*, color::*, geometry::*, piece::*};

pub(crate) mod board;
pub(crate) mod color;
pub(crate) mod geometry;
pub(crate) mod piece;
