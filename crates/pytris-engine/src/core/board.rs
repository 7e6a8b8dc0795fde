use std::fmt;

use crate::BoardError;

use super::color::Color;

/// A single cell of the game board.
///
/// Frozen blocks keep the color of the piece they came from; the board does not
/// remember which piece kind produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Nothing frozen here.
    #[default]
    Empty,
    /// A frozen block.
    Filled(Color),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str("."),
            Cell::Filled(_) => f.write_str("#"),
        }
    }
}

/// A two-dimensional rectangular grid stored as one flat row-major vector.
///
/// For a board with 3 columns and 2 rows:
///
/// ```text
///  col col col
///   0   1   2
/// +---+---+---+
/// | 0 | 1 | 2 |  row 0
/// +---+---+---+
/// | 3 | 4 | 5 |  row 1
/// +---+---+---+
/// ```
///
/// the underlying storage is `[0, 1, 2, 3, 4, 5]` and `(x, y)` lives at index
/// `y * num_cols + x`.
///
/// The column count is fixed for the lifetime of the board. Rows can be removed
/// and inserted, which is how cleared lines are dropped and refilled from the top.
///
/// # Example
///
/// ```
/// use pytris_engine::Board;
///
/// let mut board = Board::from_grid(3, 2, vec![0, 1, 2, 3, 4, 5])?;
/// board.set(0, 1, 30)?;
/// assert_eq!(board.get(0, 1)?, &30);
/// assert_eq!(board.get_row(1)?, &[30, 4, 5]);
/// assert!(!board.valid(3, 0));
/// # Ok::<(), pytris_engine::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<T = Cell> {
    num_cols: usize,
    num_rows: usize,
    cells: Vec<T>,
}

impl<T> Board<T>
where
    T: Clone,
{
    /// Creates a `num_cols` × `num_rows` board with every cell set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if the number of cells overflows `usize`.
    #[must_use]
    pub fn new(num_cols: usize, num_rows: usize, fill: T) -> Self {
        let len = num_cols
            .checked_mul(num_rows)
            .expect("board cell count overflows usize");
        Self {
            num_cols,
            num_rows,
            cells: vec![fill; len],
        }
    }

    /// Returns a copy of column `x`, top to bottom.
    pub fn get_col(&self, x: usize) -> Result<Vec<T>, BoardError> {
        if x >= self.num_cols {
            return Err(BoardError::ColumnOutOfBounds {
                x,
                num_cols: self.num_cols,
            });
        }
        Ok(self
            .cells
            .iter()
            .skip(x)
            .step_by(self.num_cols)
            .cloned()
            .collect())
    }
}

impl<T> Board<T> {
    /// Builds a board from an existing row-major grid.
    ///
    /// Fails when `grid.len()` is not `num_cols * num_rows`.
    pub fn from_grid(num_cols: usize, num_rows: usize, grid: Vec<T>) -> Result<Self, BoardError> {
        if num_cols.checked_mul(num_rows) != Some(grid.len()) {
            return Err(BoardError::GridSizeMismatch {
                len: grid.len(),
                expected: num_cols.saturating_mul(num_rows),
            });
        }
        Ok(Self {
            num_cols,
            num_rows,
            cells: grid,
        })
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns whether `(x, y)` lies on the board.
    ///
    /// Never fails; this is the check to run before [`Self::get`] or [`Self::set`]
    /// when a coordinate may be off the board.
    #[must_use]
    pub fn valid(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some()
    }

    /// Returns the item at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<&T, BoardError> {
        let index = self.checked_index(x, y)?;
        Ok(&self.cells[index])
    }

    /// Overwrites the item at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, item: T) -> Result<(), BoardError> {
        let index = self.checked_index(x, y)?;
        self.cells[index] = item;
        Ok(())
    }

    /// Like [`Self::get`], but returns `None` for coordinates off the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<&T> {
        self.index_of(x, y).map(|index| &self.cells[index])
    }

    /// Returns row `y`, left to right.
    pub fn get_row(&self, y: usize) -> Result<&[T], BoardError> {
        self.check_row(y)?;
        let start = y * self.num_cols;
        Ok(&self.cells[start..start + self.num_cols])
    }

    /// Removes row `y`; rows below keep their order and the row count drops by one.
    pub fn delete_row(&mut self, y: usize) -> Result<(), BoardError> {
        self.check_row(y)?;
        let start = y * self.num_cols;
        self.cells.drain(start..start + self.num_cols);
        self.num_rows -= 1;
        Ok(())
    }

    /// Inserts `row` so that it becomes row `y`; the row count grows by one.
    ///
    /// `y` may be equal to the current row count to append at the bottom.
    pub fn insert_row_at(&mut self, y: usize, row: Vec<T>) -> Result<(), BoardError> {
        if y > self.num_rows {
            return Err(BoardError::RowOutOfBounds {
                y,
                num_rows: self.num_rows,
            });
        }
        if row.len() != self.num_cols {
            return Err(BoardError::RowLengthMismatch {
                len: row.len(),
                num_cols: self.num_cols,
            });
        }
        let start = y * self.num_cols;
        self.cells.splice(start..start, row);
        self.num_rows += 1;
        Ok(())
    }

    /// Converts an index of the underlying grid into an `(x, y)` coordinate.
    pub fn index_to_coordinate(&self, index: usize) -> Result<(usize, usize), BoardError> {
        if index >= self.cells.len() {
            return Err(BoardError::IndexOutOfBounds {
                index,
                len: self.cells.len(),
            });
        }
        Ok((index % self.num_cols, index / self.num_cols))
    }

    /// Returns the coordinates of all items satisfying `pred`, in row-major order.
    pub fn filter_coordinates<F>(&self, mut pred: F) -> Vec<(usize, usize)>
    where
        F: FnMut(&T) -> bool,
    {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, item)| pred(item))
            .map(|(i, _)| (i % self.num_cols, i / self.num_cols))
            .collect()
    }

    /// Iterates over all items in row-major order.
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.cells.iter()
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // `chunks` panics on zero, and a column-less board has no rows worth showing.
        self.cells.chunks(self.num_cols.max(1))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.num_cols && y < self.num_rows).then(|| y * self.num_cols + x)
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize, BoardError> {
        self.index_of(x, y)
            .ok_or(BoardError::CoordinateOutOfBounds {
                x,
                y,
                num_cols: self.num_cols,
                num_rows: self.num_rows,
            })
    }

    fn check_row(&self, y: usize) -> Result<(), BoardError> {
        if y >= self.num_rows {
            return Err(BoardError::RowOutOfBounds {
                y,
                num_rows: self.num_rows,
            });
        }
        Ok(())
    }
}

impl<T> fmt::Display for Board<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat((self.num_cols * 2).saturating_sub(1));
        writeln!(f, "{rule}")?;
        for row in self.rows().take(self.num_rows) {
            for (i, item) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{item}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{rule}")
    }
}
