/// Points awarded for each cleared row.
///
/// Clearing several rows at once earns no bonus.
pub const SCORE_PER_ROW: usize = 100;

/// Points awarded for each successful player-initiated step down.
pub const SCORE_PER_SOFT_DROP: usize = 1;

/// Score, cleared rows and level of a running game.
///
/// The level starts at 1 and increases by one every `lines_per_level` cleared rows.
///
/// # Example
///
/// ```
/// use pytris_engine::GameStats;
///
/// let mut stats = GameStats::new(10);
/// stats.complete_piece_drop(4);
/// stats.add_soft_drop();
///
/// assert_eq!(stats.score(), 401);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// assert_eq!(stats.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    lines_per_level: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(10)
    }
}

impl GameStats {
    /// Creates a tracker with all counters at zero.
    ///
    /// A `lines_per_level` of zero is treated as one.
    #[must_use]
    pub const fn new(lines_per_level: usize) -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            lines_per_level: if lines_per_level == 0 { 1 } else { lines_per_level },
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        1 + self.total_cleared_lines / self.lines_per_level
    }

    /// Number of pieces frozen into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of freezes by number of rows cleared (0 to 4).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a frozen piece that cleared `cleared_lines` rows.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += SCORE_PER_ROW * cleared_lines;
    }

    /// Records one successful manual step down.
    pub const fn add_soft_drop(&mut self) {
        self.score += SCORE_PER_SOFT_DROP;
    }
}
