use arrayvec::ArrayVec;
use tracing::debug;

use crate::{
    BLOCKS_PER_PIECE, Board, Cell, GameConfig, GameError, Holder, NextQueue, Piece, PieceKind,
    PieceSeed, Point, Transform,
};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum GameOverReason {
    /// A newly spawned piece overlapped a filled cell.
    #[display("spawn blocked")]
    SpawnBlocked,
    /// A piece froze with a block outside the board.
    #[display("piece frozen above the board")]
    FrozenOutside,
    #[display("quit")]
    Quit,
}

/// The board together with the falling piece, the next-up queue and the hold slot.
///
/// Once the game is over, every step on the field is a no-op.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    current: Option<Piece>,
    next_queue: NextQueue,
    holder: Holder,
    spawn_point: Point,
    game_over: Option<GameOverReason>,
}

impl GameField {
    /// Creates an empty field. No piece falls until [`Self::spawn`] is called.
    #[must_use]
    pub fn new(config: &GameConfig, seed: PieceSeed) -> Self {
        Self {
            board: Board::new(config.num_cols, config.num_rows, Cell::Empty),
            current: None,
            next_queue: NextQueue::with_seed(config.num_nextup, seed),
            holder: Holder::new(),
            spawn_point: config.spawn_point,
            game_over: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_pieces(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.next_queue.iter()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.holder.get_item().copied()
    }

    /// Whether the hold slot accepts a piece this turn.
    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.holder.is_open()
    }

    #[must_use]
    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    /// Ends the game. An earlier reason is kept.
    pub fn end(&mut self, reason: GameOverReason) {
        self.game_over.get_or_insert(reason);
    }

    /// Whether a piece block may occupy `p`.
    ///
    /// Above the board any column inside the board is free; on the board the cell
    /// must be empty.
    #[must_use]
    pub fn is_block_valid(&self, p: Point) -> bool {
        is_block_valid(&self.board, p)
    }

    /// Makes the front of the next-up queue the falling piece.
    ///
    /// If the new piece overlaps a filled cell the game ends; the piece still
    /// becomes current so it can be drawn.
    pub fn spawn(&mut self) -> Result<(), GameError> {
        if self.game_over.is_some() {
            return Ok(());
        }
        let kind = self.next_queue.pop_next();
        let mut piece = Piece::new(kind);
        piece.place_at(self.spawn_point)?;
        let blocked = piece
            .blocks()
            .iter()
            .any(|p| self.board.cell(p.x, p.y).is_some_and(|c| !c.is_empty()));
        debug!(%kind, blocked, "spawned piece");
        self.current = Some(piece);
        if blocked {
            self.end(GameOverReason::SpawnBlocked);
        }
        Ok(())
    }

    /// Applies `transform` to the falling piece if every resulting block is valid.
    pub fn try_move(&mut self, transform: Transform) -> bool {
        if self.game_over.is_some() {
            return false;
        }
        let board = &self.board;
        self.current
            .as_mut()
            .is_some_and(|piece| piece.validated_apply(transform, |p| is_block_valid(board, p)))
    }

    /// Swaps the falling piece with the hold slot.
    ///
    /// With an empty slot the falling piece is stored and the next piece spawns.
    /// Otherwise the held kind is placed at the falling piece's reference block;
    /// if any of its blocks would be invalid nothing changes. Returns whether the
    /// hold happened. At most one hold succeeds between two freezes.
    pub fn try_hold(&mut self) -> Result<bool, GameError> {
        if self.game_over.is_some() || !self.holder.is_open() {
            return Ok(false);
        }
        let Some(current) = &self.current else {
            return Ok(false);
        };
        let current_kind = current.kind();

        let Some(&held_kind) = self.holder.get_item() else {
            self.holder.store(current_kind)?;
            self.holder.close();
            debug!(kind = %current_kind, "held piece");
            self.spawn()?;
            return Ok(true);
        };

        let mut candidate = Piece::new(held_kind);
        candidate.place_at(current.origin())?;
        if !candidate.blocks().iter().all(|&p| self.is_block_valid(p)) {
            return Ok(false);
        }
        self.holder.store(current_kind)?;
        self.current = Some(candidate);
        self.holder.close();
        debug!(held = %current_kind, released = %held_kind, "swapped held piece");
        Ok(true)
    }

    /// Writes the falling piece into the board and reopens the hold slot.
    ///
    /// Blocks outside the board are dropped and end the game; the others are
    /// still written.
    pub fn freeze(&mut self) -> Result<(), GameError> {
        if self.game_over.is_some() {
            return Ok(());
        }
        let piece = self.current.as_ref().ok_or(GameError::NoFallingPiece)?;
        self.holder.open();
        let mut outside = false;
        for &p in piece.blocks() {
            if self.board.valid(p.x, p.y) {
                self.board.set(p.x, p.y, Cell::Filled(piece.color()))?;
            } else {
                outside = true;
            }
        }
        debug!(%piece, "froze piece");
        debug!("board after freeze\n{}", self.board);
        if outside {
            self.end(GameOverReason::FrozenOutside);
        }
        Ok(())
    }

    /// Removes the full rows among those the falling piece spans and shifts the
    /// rows above down. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> Result<usize, GameError> {
        if self.game_over.is_some() {
            return Ok(0);
        }
        let piece = self.current.as_ref().ok_or(GameError::NoFallingPiece)?;
        let mut full_rows = ArrayVec::<usize, BLOCKS_PER_PIECE>::new();
        for y in piece.unique_rows() {
            let Ok(y) = usize::try_from(y) else {
                continue;
            };
            if self.board.get_row(y)?.iter().all(|c| c.is_filled()) {
                full_rows.push(y);
            }
        }
        // delete bottom-up so the remaining indices stay valid
        for &y in full_rows.iter().rev() {
            self.board.delete_row(y)?;
        }
        for _ in &full_rows {
            self.board
                .insert_row_at(0, vec![Cell::Empty; self.board.num_cols()])?;
        }
        Ok(full_rows.len())
    }
}

fn is_block_valid(board: &Board, p: Point) -> bool {
    if p.y < 0 {
        return usize::try_from(p.x).is_ok_and(|x| x < board.num_cols());
    }
    board.cell(p.x, p.y).is_some_and(Cell::is_empty)
}

#[cfg(test)]
mod tests {
    use crate::Color;

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);

    fn field() -> GameField {
        GameField::new(&GameConfig::default(), SEED)
    }

    fn filled() -> Cell {
        Cell::Filled(Color::WHITE)
    }

    fn place(field: &mut GameField, kind: PieceKind, origin: Point) {
        let mut piece = Piece::new(kind);
        piece.place_at(origin).unwrap();
        field.current = Some(piece);
    }

    fn fill_row_except(field: &mut GameField, y: i32, gaps: &[i32]) {
        for x in 0..10 {
            if !gaps.contains(&x) {
                field.board.set(x, y, filled()).unwrap();
            }
        }
    }

    #[test]
    fn test_validator() {
        let mut field = field();
        field.board.set(3, 5, filled()).unwrap();
        assert!(field.is_block_valid(Point::new(0, -3)));
        assert!(field.is_block_valid(Point::new(9, -1)));
        assert!(!field.is_block_valid(Point::new(-1, -1)));
        assert!(!field.is_block_valid(Point::new(10, -1)));
        assert!(field.is_block_valid(Point::new(3, 4)));
        assert!(!field.is_block_valid(Point::new(3, 5)));
        assert!(!field.is_block_valid(Point::new(0, 20)));
    }

    #[test]
    fn test_spawn_takes_queue_front() {
        let mut field = field();
        let expected = field.next_pieces().next().unwrap();
        field.spawn().unwrap();
        let piece = field.current_piece().unwrap();
        assert_eq!(piece.kind(), expected);
        assert_eq!(piece.origin(), Point::new(4, 0));
        assert_eq!(field.next_pieces().len(), 4);
        assert_eq!(field.game_over(), None);
    }

    #[test]
    fn test_spawn_onto_filled_cell_ends_game() {
        let mut field = field();
        field.board.set(4, 0, filled()).unwrap();
        field.spawn().unwrap();
        assert_eq!(field.game_over(), Some(GameOverReason::SpawnBlocked));
        assert!(field.current_piece().is_some());
        assert!(!field.try_move(Transform::shift_left(1)));
    }

    #[test]
    fn test_move_rejected_at_wall() {
        let mut field = field();
        place(&mut field, PieceKind::O, Point::new(0, 5));
        let before = field.current_piece().unwrap().clone();
        assert!(!field.try_move(Transform::shift_left(1)));
        assert_eq!(field.current_piece(), Some(&before));
        assert!(field.try_move(Transform::shift_right(1)));
        assert_eq!(field.current_piece().unwrap().origin(), Point::new(1, 5));
    }

    #[test]
    fn test_move_without_piece_is_rejected() {
        let mut field = field();
        assert!(!field.try_move(Transform::shift_down(1)));
        assert!(!field.try_hold().unwrap());
    }

    #[test]
    fn test_rotation_above_board_is_allowed() {
        let mut field = field();
        place(&mut field, PieceKind::T, Point::new(4, 0));
        assert!(field.try_move(Transform::RotateCw));
        let blocks = field.current_piece().unwrap().blocks();
        assert!(blocks.iter().any(|p| p.y < 0));
    }

    #[test]
    fn test_freeze_writes_cells_and_reopens_holder() {
        let mut field = field();
        place(&mut field, PieceKind::O, Point::new(0, 19));
        field.holder.close();
        field.freeze().unwrap();
        assert!(field.can_hold());
        let color = PieceKind::O.color();
        for (x, y) in [(0, 19), (0, 18), (1, 18), (1, 19)] {
            assert_eq!(field.board.get(x, y), Ok(&Cell::Filled(color)));
        }
        assert_eq!(field.game_over(), None);
    }

    #[test]
    fn test_freeze_above_board_ends_game_but_writes_valid_blocks() {
        let mut field = field();
        place(&mut field, PieceKind::O, Point::new(0, 0));
        field.freeze().unwrap();
        assert_eq!(field.game_over(), Some(GameOverReason::FrozenOutside));
        assert!(field.board.get(0, 0).unwrap().is_filled());
        assert!(field.board.get(1, 0).unwrap().is_filled());
        assert_eq!(field.clear_full_rows(), Ok(0));
        assert_eq!(field.spawn(), Ok(()));
    }

    #[test]
    fn test_freeze_without_piece_is_an_error() {
        assert_eq!(field().freeze(), Err(GameError::NoFallingPiece));
    }

    #[test]
    fn test_clear_single_row_shifts_rows_above() {
        let mut field = field();
        fill_row_except(&mut field, 19, &[4, 5, 6, 7]);
        field.board.set(0, 18, filled()).unwrap();
        field.board.set(9, 17, filled()).unwrap();
        place(&mut field, PieceKind::I, Point::new(5, 19));
        field.freeze().unwrap();

        assert_eq!(field.clear_full_rows(), Ok(1));
        assert!(field.board.get(0, 19).unwrap().is_filled());
        assert!(field.board.get(9, 18).unwrap().is_filled());
        assert!(field.board.get_row(0).unwrap().iter().all(|c| c.is_empty()));
        assert_eq!(field.board.cells().filter(|c| c.is_filled()).count(), 2);
    }

    #[test]
    fn test_clear_only_rows_spanned_by_piece() {
        let mut field = field();
        fill_row_except(&mut field, 10, &[]);
        fill_row_except(&mut field, 19, &[0, 1]);
        fill_row_except(&mut field, 18, &[0, 1]);
        place(&mut field, PieceKind::O, Point::new(0, 19));
        field.freeze().unwrap();

        assert_eq!(field.clear_full_rows(), Ok(2));
        // row 10 was full but untouched by the piece, so it only moved down
        assert!(field.board.get_row(12).unwrap().iter().all(|c| c.is_filled()));
        assert_eq!(field.board.cells().filter(|c| c.is_filled()).count(), 10);
    }

    #[test]
    fn test_hold_into_empty_slot_spawns_next() {
        let mut field = field();
        field.spawn().unwrap();
        let first = field.current_piece().unwrap().kind();
        let next = field.next_pieces().next().unwrap();

        assert!(field.try_hold().unwrap());
        assert_eq!(field.held_piece(), Some(first));
        assert_eq!(field.current_piece().unwrap().kind(), next);
        assert!(!field.can_hold());
        assert!(!field.try_hold().unwrap());
    }

    #[test]
    fn test_hold_into_empty_slot_can_block_the_spawn() {
        let mut field = field();
        place(&mut field, PieceKind::T, Point::new(4, 10));
        // every piece has its reference block on the spawn point
        fill_row_except(&mut field, 0, &[]);
        let next = field.next_pieces().next().unwrap();

        assert!(field.try_hold().unwrap());
        assert_eq!(field.held_piece(), Some(PieceKind::T));
        assert_eq!(field.game_over(), Some(GameOverReason::SpawnBlocked));
        let piece = field.current_piece().unwrap();
        assert_eq!(piece.kind(), next);
        assert_eq!(piece.origin(), Point::new(4, 0));
        assert!(!field.try_hold().unwrap());
    }

    #[test]
    fn test_hold_swaps_at_reference_block() {
        let mut field = field();
        field.holder.store(PieceKind::O).unwrap();
        place(&mut field, PieceKind::T, Point::new(3, 10));

        assert!(field.try_hold().unwrap());
        let piece = field.current_piece().unwrap();
        assert_eq!(piece.kind(), PieceKind::O);
        assert_eq!(piece.origin(), Point::new(3, 10));
        assert_eq!(field.held_piece(), Some(PieceKind::T));
        assert!(!field.can_hold());
    }

    #[test]
    fn test_hold_rejected_when_candidate_collides() {
        let mut field = field();
        field.holder.store(PieceKind::I).unwrap();
        place(&mut field, PieceKind::T, Point::new(4, 10));
        field.board.set(6, 10, filled()).unwrap();

        assert!(!field.try_hold().unwrap());
        assert_eq!(field.current_piece().unwrap().kind(), PieceKind::T);
        assert_eq!(field.held_piece(), Some(PieceKind::I));
        assert!(field.can_hold());
    }

    #[test]
    fn test_end_keeps_first_reason() {
        let mut field = field();
        field.end(GameOverReason::SpawnBlocked);
        field.end(GameOverReason::Quit);
        assert_eq!(field.game_over(), Some(GameOverReason::SpawnBlocked));
    }
}
