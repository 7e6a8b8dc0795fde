use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use crate::AlreadyPlacedError;

use super::{
    color::Color,
    geometry::{Point, RotationCenter, Transform},
};

/// Number of blocks in every piece.
pub const BLOCKS_PER_PIECE: usize = 4;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// L-piece.
    L = 2,
    /// S-piece.
    S = 3,
    /// T-piece.
    T = 4,
    /// J-piece.
    J = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::J,
        PieceKind::Z,
    ];

    /// Returns the fixed shape template of this kind.
    #[must_use]
    pub const fn template(self) -> &'static PieceTemplate {
        &PIECE_TEMPLATES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.template().color
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// ```
    /// use pytris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.to_string(), "T");
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::J => 'J',
            PieceKind::Z => 'Z',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Immutable description of a piece kind.
///
/// Offsets are relative to the reference block, which is always the first entry
/// and always `(0, 0)`. The rotation center is relative to the reference block too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    pub offsets: [Point; BLOCKS_PER_PIECE],
    pub color: Color,
    pub rotation_center: RotationCenter,
}

const PIECE_TEMPLATES: [PieceTemplate; PieceKind::LEN] = {
    const fn t(
        offsets: [(i32, i32); BLOCKS_PER_PIECE],
        color: Color,
        rotation_center: RotationCenter,
    ) -> PieceTemplate {
        let mut points = [Point::ORIGIN; BLOCKS_PER_PIECE];
        let mut i = 0;
        while i < BLOCKS_PER_PIECE {
            points[i] = Point::new(offsets[i].0, offsets[i].1);
            i += 1;
        }
        assert!(points[0].x == 0 && points[0].y == 0);
        PieceTemplate {
            offsets: points,
            color,
            rotation_center,
        }
    }

    const O: RotationCenter = RotationCenter::ORIGIN;

    [
        // I-piece: rotates around (0.5, 0.5)
        t(
            [(0, 0), (-1, 0), (1, 0), (2, 0)],
            Color::CYAN,
            RotationCenter::from_half_units(1, 1),
        ),
        // O-piece: rotates around (0.5, -0.5), i.e. in place
        t(
            [(0, 0), (0, -1), (1, -1), (1, 0)],
            Color::YELLOW,
            RotationCenter::from_half_units(1, -1),
        ),
        // L-piece
        t([(0, 0), (-1, 0), (1, 0), (1, -1)], Color::ORANGE, O),
        // S-piece
        t([(0, 0), (-1, 0), (0, -1), (1, -1)], Color::GREEN, O),
        // T-piece
        t([(0, 0), (0, -1), (-1, 0), (1, 0)], Color::PURPLE, O),
        // J-piece
        t([(0, 0), (-1, -1), (-1, 0), (1, 0)], Color::BLUE, O),
        // Z-piece
        t([(0, 0), (0, -1), (-1, -1), (1, 0)], Color::RED, O),
    ]
};

/// A piece instance: a kind, its four blocks and its rotation center.
///
/// A fresh piece holds its template offsets. [`Piece::place_at`] translates it onto
/// the board exactly once; afterwards every coordinate is board-absolute and all
/// movement goes through [`Piece::validated_apply`], which either moves every
/// block or none of them.
///
/// # Example
///
/// ```
/// use pytris_engine::{Piece, PieceKind, Point, Transform};
///
/// let mut piece = Piece::new(PieceKind::T);
/// piece.place_at(Point::new(4, 0))?;
///
/// // Rejected: the piece would leave the first four columns.
/// assert!(!piece.validated_apply(Transform::shift_left(4), |p| p.x >= 0));
/// assert_eq!(piece.origin(), Point::new(4, 0));
///
/// assert!(piece.validated_apply(Transform::shift_down(1), |_| true));
/// assert_eq!(piece.origin(), Point::new(4, 1));
/// # Ok::<(), pytris_engine::AlreadyPlacedError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    blocks: [Point; BLOCKS_PER_PIECE],
    color: Color,
    rotation_center: RotationCenter,
    placed: bool,
}

impl Piece {
    /// Creates an unplaced piece from the kind's template.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let template = kind.template();
        Self {
            kind,
            blocks: template.offsets,
            color: template.color,
            rotation_center: template.rotation_center,
            placed: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn rotation_center(&self) -> RotationCenter {
        self.rotation_center
    }

    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Current block positions; the reference block comes first.
    #[must_use]
    pub fn blocks(&self) -> &[Point; BLOCKS_PER_PIECE] {
        &self.blocks
    }

    /// Position of the reference block.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.blocks[0]
    }

    /// Rows spanned by this piece, top to bottom, without duplicates.
    #[must_use]
    pub fn unique_rows(&self) -> ArrayVec<i32, BLOCKS_PER_PIECE> {
        let mut rows: ArrayVec<i32, BLOCKS_PER_PIECE> = self.blocks.iter().map(|p| p.y).collect();
        rows.sort_unstable();
        let mut unique = ArrayVec::new();
        for y in rows {
            if unique.last() != Some(&y) {
                unique.push(y);
            }
        }
        unique
    }

    /// Rotates `p` by 90° clockwise around this piece's rotation center.
    ///
    /// ```
    /// use pytris_engine::{Piece, PieceKind, Point};
    ///
    /// let t = Piece::new(PieceKind::T);
    /// assert_eq!(t.rotate_block_90_cw(Point::new(-1, 0)), Point::new(0, -1));
    /// assert_eq!(t.rotate_block_90_cw(Point::new(0, 0)), Point::new(0, 0));
    /// assert_eq!(t.rotate_block_90_cw(Point::new(1, 0)), Point::new(0, 1));
    /// ```
    #[must_use]
    pub fn rotate_block_90_cw(&self, p: Point) -> Point {
        self.rotation_center.rotate_cw(p)
    }

    /// Returns the block positions satisfying `pred`, without changing anything.
    pub fn filter_blocks_pos<F>(&self, mut pred: F) -> ArrayVec<Point, BLOCKS_PER_PIECE>
    where
        F: FnMut(Point) -> bool,
    {
        self.blocks.iter().copied().filter(|&p| pred(p)).collect()
    }

    /// Applies `transform` to every block if, and only if, every resulting
    /// position passes `validator`.
    ///
    /// Returns `false` and leaves the piece untouched on rejection. On success the
    /// blocks move and, unless the transform is a rotation, so does the rotation
    /// center.
    pub fn validated_apply<F>(&mut self, transform: Transform, mut validator: F) -> bool
    where
        F: FnMut(Point) -> bool,
    {
        let center = self.rotation_center;
        let moved = self.blocks.map(|p| transform.apply(center, p));
        if !moved.iter().all(|&p| validator(p)) {
            return false;
        }
        self.blocks = moved;
        if !transform.is_rotation() {
            self.rotation_center = transform.apply_to_center(center);
        }
        true
    }

    /// Moves the reference block onto `origin`. Allowed once per piece.
    pub fn place_at(&mut self, origin: Point) -> Result<(), AlreadyPlacedError> {
        if self.placed {
            return Err(AlreadyPlacedError);
        }
        let moved = self.validated_apply(Transform::translate_to(origin), |_| true);
        debug_assert!(moved);
        self.placed = true;
        Ok(())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (i, p) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "] @ {}", self.rotation_center)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn points(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    fn block_set(piece: &Piece) -> HashSet<Point> {
        piece.blocks().iter().copied().collect()
    }

    #[test]
    fn test_templates_start_with_reference_block() {
        let mut colors = HashSet::new();
        for kind in PieceKind::ALL {
            let template = kind.template();
            assert_eq!(template.offsets[0], Point::ORIGIN, "{kind}");
            let unique: HashSet<_> = template.offsets.iter().collect();
            assert_eq!(unique.len(), BLOCKS_PER_PIECE, "{kind}");
            colors.insert(template.color);
        }
        assert_eq!(colors.len(), PieceKind::LEN);
    }

    #[test]
    fn test_only_i_and_o_have_offset_centers() {
        for kind in PieceKind::ALL {
            let center = kind.template().rotation_center;
            match kind {
                PieceKind::I | PieceKind::O => assert_ne!(center, RotationCenter::ORIGIN),
                _ => assert_eq!(center, RotationCenter::ORIGIN),
            }
        }
    }

    #[test]
    fn test_filter_blocks_pos() {
        let s = Piece::new(PieceKind::S);
        assert_eq!(
            s.filter_blocks_pos(|p| p.x == 0).to_vec(),
            points(&[(0, 0), (0, -1)])
        );
        assert_eq!(
            s.filter_blocks_pos(|p| p.x * p.y < 0).to_vec(),
            points(&[(1, -1)])
        );
        assert_eq!(s, Piece::new(PieceKind::S));
    }

    #[test]
    fn test_validated_apply_rejection_changes_nothing() {
        let mut t = Piece::new(PieceKind::T);
        let before = t.clone();
        assert!(!t.validated_apply(Transform::shift_right(1), |p| p.x > 0));
        assert_eq!(t, before);
        assert!(!t.validated_apply(Transform::RotateCw, |_| false));
        assert_eq!(t, before);
    }

    #[test]
    fn test_validated_apply_shift_moves_center() {
        let mut t = Piece::new(PieceKind::T);
        assert!(t.validated_apply(Transform::shift_right(1), |_| true));
        assert_eq!(t.blocks().to_vec(), points(&[(1, 0), (1, -1), (0, 0), (2, 0)]));
        assert_eq!(t.rotation_center(), RotationCenter::at(Point::new(1, 0)));
    }

    #[test]
    fn test_validated_apply_rotation_keeps_center() {
        let mut i = Piece::new(PieceKind::I);
        let center = i.rotation_center();
        assert!(i.validated_apply(Transform::RotateCw, |_| true));
        assert_eq!(i.blocks().to_vec(), points(&[(1, 0), (1, -1), (1, 1), (1, 2)]));
        assert_eq!(i.rotation_center(), center);
    }

    #[test]
    fn test_o_piece_rotates_in_place() {
        let mut o = Piece::new(PieceKind::O);
        o.place_at(Point::new(4, 5)).unwrap();
        let before = block_set(&o);
        for _ in 0..4 {
            assert!(o.validated_apply(Transform::RotateCw, |_| true));
            assert_eq!(block_set(&o), before);
        }
    }

    #[test]
    fn test_four_rotations_restore_every_kind() {
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind);
            piece.place_at(Point::new(4, 0)).unwrap();
            let before = piece.clone();
            for _ in 0..4 {
                assert!(piece.validated_apply(Transform::RotateCw, |_| true));
            }
            assert_eq!(piece, before, "{kind}");
        }
    }

    #[test]
    fn test_place_at_is_one_shot() {
        let mut z = Piece::new(PieceKind::Z);
        assert!(!z.is_placed());
        z.place_at(Point::new(4, 0)).unwrap();
        assert!(z.is_placed());
        assert_eq!(z.origin(), Point::new(4, 0));
        assert_eq!(z.rotation_center(), RotationCenter::at(Point::new(4, 0)));

        let before = z.clone();
        assert_eq!(z.place_at(Point::new(0, 10)), Err(AlreadyPlacedError));
        assert_eq!(z, before);
    }

    #[test]
    fn test_place_at_moves_half_unit_center() {
        let mut i = Piece::new(PieceKind::I);
        i.place_at(Point::new(4, 0)).unwrap();
        assert_eq!(i.rotation_center(), RotationCenter::from_half_units(9, 1));
    }

    #[test]
    fn test_unique_rows() {
        let mut j = Piece::new(PieceKind::J);
        j.place_at(Point::new(4, 7)).unwrap();
        assert_eq!(j.unique_rows().to_vec(), vec![6, 7]);

        let mut i = Piece::new(PieceKind::I);
        i.place_at(Point::new(4, 7)).unwrap();
        assert!(i.validated_apply(Transform::RotateCw, |_| true));
        assert_eq!(i.unique_rows().to_vec(), vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_display() {
        let t = Piece::new(PieceKind::T);
        assert_eq!(t.to_string(), "T[(0, 0), (0, -1), (-1, 0), (1, 0)] @ (0, 0)");
    }

    #[test]
    fn test_uniform_sampling_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(rng.random::<PieceKind>());
        }
        assert_eq!(seen.len(), PieceKind::LEN);
    }
}
