use std::fmt;

use serde::{Deserialize, Serialize};

/// An integer coordinate on (or around) the board.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows)
/// - Negative Y is above the visible board, where freshly spawned pieces may poke out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Center of rotation of a piece.
///
/// Pieces with an even-sized bounding box (I and O) rotate around a point halfway
/// between cells, so the center is kept in half-units. Both components are either
/// integral or both half-integral, which keeps every rotated block on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationCenter {
    x2: i32,
    y2: i32,
}

impl RotationCenter {
    pub const ORIGIN: Self = Self::at(Point::ORIGIN);

    /// A center sitting exactly on a cell.
    #[must_use]
    pub const fn at(p: Point) -> Self {
        Self {
            x2: p.x * 2,
            y2: p.y * 2,
        }
    }

    /// A center given in half-units, e.g. `(1, -1)` for `(0.5, -0.5)`.
    ///
    /// # Panics
    ///
    /// Panics if exactly one of the components is odd.
    #[must_use]
    pub const fn from_half_units(x2: i32, y2: i32) -> Self {
        assert!((x2 ^ y2) & 1 == 0, "rotation center components must share parity");
        Self { x2, y2 }
    }

    #[must_use]
    pub fn x(self) -> f64 {
        f64::from(self.x2) / 2.0
    }

    #[must_use]
    pub fn y(self) -> f64 {
        f64::from(self.y2) / 2.0
    }

    /// Rotates `p` by 90° clockwise around this center.
    ///
    /// `p' = (c.y - p.y + c.x, p.x - c.x + c.y)`, evaluated without leaving the integers.
    ///
    /// ```
    /// use pytris_engine::{Point, RotationCenter};
    ///
    /// let c = RotationCenter::from_half_units(1, 1);
    /// assert_eq!(c.rotate_cw(Point::new(-1, 0)), Point::new(1, -1));
    /// ```
    #[must_use]
    pub const fn rotate_cw(self, p: Point) -> Point {
        Point::new((self.x2 + self.y2) / 2 - p.y, p.x + (self.y2 - self.x2) / 2)
    }

    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x2: self.x2 + dx * 2,
            y2: self.y2 + dy * 2,
        }
    }
}

impl fmt::Display for RotationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

/// A coordinate transformation applied to every block of a piece.
///
/// Transforms are plain values; building one has no effect until it is handed to
/// [`Piece::validated_apply`](super::piece::Piece::validated_apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Transform {
    /// Translate by `(dx, dy)`. The rotation center moves along with the blocks.
    Shift { dx: i32, dy: i32 },
    /// Rotate 90° clockwise around the piece's rotation center, which stays put.
    RotateCw,
}

impl Transform {
    /// `(x, y) -> (x, y + steps)`
    ///
    /// ```
    /// use pytris_engine::{Point, RotationCenter, Transform};
    ///
    /// let f = Transform::shift_down(3);
    /// assert_eq!(f.apply(RotationCenter::ORIGIN, Point::new(0, 0)), Point::new(0, 3));
    /// ```
    #[must_use]
    pub const fn shift_down(steps: i32) -> Self {
        Self::Shift { dx: 0, dy: steps }
    }

    /// `(x, y) -> (x - steps, y)`
    #[must_use]
    pub const fn shift_left(steps: i32) -> Self {
        Self::Shift { dx: -steps, dy: 0 }
    }

    /// `(x, y) -> (x + steps, y)`
    #[must_use]
    pub const fn shift_right(steps: i32) -> Self {
        Self::Shift { dx: steps, dy: 0 }
    }

    /// Translation moving the reference offset `(0, 0)` onto `origin`.
    #[must_use]
    pub const fn translate_to(origin: Point) -> Self {
        Self::Shift {
            dx: origin.x,
            dy: origin.y,
        }
    }

    #[must_use]
    pub const fn is_rotation(self) -> bool {
        matches!(self, Self::RotateCw)
    }

    /// Maps a single point.
    #[must_use]
    pub const fn apply(self, center: RotationCenter, p: Point) -> Point {
        match self {
            Self::Shift { dx, dy } => Point::new(p.x + dx, p.y + dy),
            Self::RotateCw => center.rotate_cw(p),
        }
    }

    /// Where the rotation center ends up after this transform.
    #[must_use]
    pub const fn apply_to_center(self, center: RotationCenter) -> RotationCenter {
        match self {
            Self::Shift { dx, dy } => center.translate(dx, dy),
            Self::RotateCw => center,
        }
    }
}
