use serde::{Deserialize, Serialize};

use crate::{ConfigError, PieceKind, Point};

/// Largest number of columns or rows a board may have.
pub const MAX_BOARD_SIDE: usize = 1000;

/// Tunable game parameters.
///
/// Every field has a default, so a config file only needs the fields it changes:
///
/// ```
/// use pytris_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "num_rows": 24 }"#)?;
/// assert_eq!(config.num_rows, 24);
/// assert_eq!(config.num_cols, 10);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub num_cols: usize,
    pub num_rows: usize,
    /// Length of the next-up queue.
    pub num_nextup: usize,
    /// Where the reference block of each new piece is placed.
    pub spawn_point: Point,
    /// Gravity speed at level 1, in rows per second.
    pub start_speed: f64,
    /// Extra rows per second gained with each level.
    pub speed_increment: f64,
    pub lines_per_level: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_cols: 10,
            num_rows: 20,
            num_nextup: 4,
            spawn_point: Point::new(4, 0),
            start_speed: 1.0,
            speed_increment: 0.1,
            lines_per_level: 10,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_cols == 0 || self.num_rows == 0 {
            return Err(ConfigError::EmptyBoard {
                num_cols: self.num_cols,
                num_rows: self.num_rows,
            });
        }
        if self.num_cols > MAX_BOARD_SIDE || self.num_rows > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                num_cols: self.num_cols,
                num_rows: self.num_rows,
                max: MAX_BOARD_SIDE,
            });
        }
        if let Some(kind) = PieceKind::ALL
            .into_iter()
            .find(|&kind| !self.fits_at_spawn(kind))
        {
            return Err(ConfigError::SpawnOutsideBoard {
                x: self.spawn_point.x,
                y: self.spawn_point.y,
                kind,
                num_cols: self.num_cols,
                num_rows: self.num_rows,
            });
        }
        if !(self.start_speed.is_finite() && self.start_speed > 0.0) {
            return Err(ConfigError::InvalidStartSpeed {
                speed: self.start_speed,
            });
        }
        if !(self.speed_increment.is_finite() && self.speed_increment >= 0.0) {
            return Err(ConfigError::InvalidSpeedIncrement {
                increment: self.speed_increment,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Whether a freshly spawned `kind` lies in the board's columns with its
    /// reference block on the board. Blocks above the top row are allowed.
    fn fits_at_spawn(&self, kind: PieceKind) -> bool {
        let spawn = self.spawn_point;
        if !usize::try_from(spawn.y).is_ok_and(|y| y < self.num_rows) {
            return false;
        }
        kind.template().offsets.iter().all(|offset| {
            let x = i64::from(spawn.x) + i64::from(offset.x);
            let y = i64::from(spawn.y) + i64::from(offset.y);
            usize::try_from(x).is_ok_and(|x| x < self.num_cols)
                && (y < 0 || usize::try_from(y).is_ok_and(|y| y < self.num_rows))
        })
    }

    /// Gravity speed in rows per second at `level` (1-based).
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn speed(&self, level: usize) -> f64 {
        self.start_speed + self.speed_increment * level.saturating_sub(1) as f64
    }

    /// Milliseconds between two gravity steps at `level`.
    #[must_use]
    pub fn gravity_interval_millis(&self, level: usize) -> f64 {
        1000.0 / self.speed(level)
    }
}
