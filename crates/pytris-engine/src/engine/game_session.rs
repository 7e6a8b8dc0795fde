use tracing::{debug, info};

use crate::{GameConfig, GameError, GameField, GameOverReason, GameStats, PieceSeed, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

/// Everything a player can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Hold,
    TogglePause,
    Quit,
}

/// A game from the main menu to game over.
///
/// Time is passed in as milliseconds on any monotonic clock. Gravity moves the
/// falling piece one row down whenever a full gravity interval has passed since
/// the previous step; a piece that cannot move down is frozen, full rows are
/// cleared and the next piece spawns.
///
/// # Example
///
/// ```
/// use pytris_engine::{Action, GameConfig, GameSession, PieceSeed, SessionState};
///
/// let mut session = GameSession::new(GameConfig::default(), PieceSeed::from_bytes([0; 16]));
/// assert_eq!(session.state(), SessionState::MainMenu);
///
/// session.start(0)?;
/// assert!(session.apply(Action::SoftDrop, 10)?);
/// assert_eq!(session.stats().score(), 1);
///
/// session.apply(Action::Quit, 20)?;
/// assert!(session.state().is_game_over());
/// # Ok::<(), pytris_engine::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    field: GameField,
    stats: GameStats,
    state: SessionState,
    last_gravity_ms: u64,
}

impl GameSession {
    #[must_use]
    pub fn new(config: GameConfig, seed: PieceSeed) -> Self {
        Self {
            field: GameField::new(&config, seed),
            stats: GameStats::new(config.lines_per_level),
            state: SessionState::MainMenu,
            last_gravity_ms: 0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut GameField {
        &mut self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.field.game_over()
    }

    /// Leaves the main menu and spawns the first piece.
    ///
    /// Returns `false` outside the main menu.
    pub fn start(&mut self, now_ms: u64) -> Result<bool, GameError> {
        if !self.state.is_main_menu() {
            return Ok(false);
        }
        info!("game started");
        self.state = SessionState::Playing;
        self.last_gravity_ms = now_ms;
        self.field.spawn()?;
        self.sync_game_over();
        Ok(true)
    }

    /// Performs `action`. Returns whether anything changed.
    pub fn apply(&mut self, action: Action, now_ms: u64) -> Result<bool, GameError> {
        match action {
            Action::MoveLeft => Ok(self.move_left()),
            Action::MoveRight => Ok(self.move_right()),
            Action::SoftDrop => Ok(self.soft_drop()),
            Action::Rotate => Ok(self.rotate()),
            Action::HardDrop => self.hard_drop(now_ms),
            Action::Hold => self.hold(),
            Action::TogglePause => Ok(self.toggle_pause(now_ms)),
            Action::Quit => Ok(self.quit()),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(Transform::shift_left(1))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(Transform::shift_right(1))
    }

    pub fn rotate(&mut self) -> bool {
        self.try_move(Transform::RotateCw)
    }

    /// Moves the falling piece one row down, scoring a point on success.
    ///
    /// A piece that cannot move down is left for gravity to freeze.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(Transform::shift_down(1));
        if moved {
            self.stats.add_soft_drop();
        }
        moved
    }

    /// Drops the falling piece as far as it goes and freezes it at once.
    ///
    /// Every row fallen scores like a soft drop.
    pub fn hard_drop(&mut self, now_ms: u64) -> Result<bool, GameError> {
        if !self.state.is_playing() {
            return Ok(false);
        }
        while self.soft_drop() {}
        self.complete_turn()?;
        self.last_gravity_ms = now_ms;
        Ok(true)
    }

    pub fn hold(&mut self) -> Result<bool, GameError> {
        if !self.state.is_playing() {
            return Ok(false);
        }
        let held = self.field.try_hold()?;
        self.sync_game_over();
        Ok(held)
    }

    /// Switches between playing and paused.
    ///
    /// Resuming restarts the gravity interval so no time passes while paused.
    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        self.state = match self.state {
            SessionState::Playing => {
                info!("paused");
                SessionState::Paused
            }
            SessionState::Paused => {
                info!("resumed");
                self.last_gravity_ms = now_ms;
                SessionState::Playing
            }
            SessionState::MainMenu | SessionState::GameOver => return false,
        };
        true
    }

    /// Ends the game from any state.
    pub fn quit(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        self.field.end(GameOverReason::Quit);
        self.sync_game_over();
        true
    }

    /// Advances gravity to `now_ms`.
    #[expect(clippy::cast_precision_loss)]
    pub fn update(&mut self, now_ms: u64) -> Result<(), GameError> {
        if !self.state.is_playing() {
            return Ok(());
        }
        let elapsed = now_ms.saturating_sub(self.last_gravity_ms);
        if (elapsed as f64) < self.config.gravity_interval_millis(self.stats.level()) {
            return Ok(());
        }
        self.last_gravity_ms = now_ms;
        if !self.field.try_move(Transform::shift_down(1)) {
            self.complete_turn()?;
        }
        Ok(())
    }

    fn try_move(&mut self, transform: Transform) -> bool {
        self.state.is_playing() && self.field.try_move(transform)
    }

    fn complete_turn(&mut self) -> Result<(), GameError> {
        self.field.freeze()?;
        let cleared = self.field.clear_full_rows()?;
        if self.field.game_over().is_none() {
            let level = self.stats.level();
            self.stats.complete_piece_drop(cleared);
            if cleared > 0 {
                info!(cleared, score = self.stats.score(), "cleared rows");
            }
            if self.stats.level() > level {
                debug!(level = self.stats.level(), "level up");
            }
        }
        self.field.spawn()?;
        self.sync_game_over();
        Ok(())
    }

    fn sync_game_over(&mut self) {
        if let Some(reason) = self.field.game_over()
            && !self.state.is_game_over()
        {
            info!(
                %reason,
                score = self.stats.score(),
                lines = self.stats.total_cleared_lines(),
                "game over"
            );
            self.state = SessionState::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    fn started() -> GameSession {
        let mut session = GameSession::new(GameConfig::default(), SEED);
        assert!(session.start(0).unwrap());
        session
    }

    fn origin(session: &GameSession) -> crate::Point {
        session.field().current_piece().unwrap().origin()
    }

    #[test]
    fn test_actions_ignored_in_main_menu() {
        let mut session = GameSession::new(GameConfig::default(), SEED);
        for action in [Action::MoveLeft, Action::SoftDrop, Action::HardDrop, Action::Hold] {
            assert!(!session.apply(action, 0).unwrap());
        }
        assert!(!session.toggle_pause(0));
        session.update(10_000).unwrap();
        assert!(session.field().current_piece().is_none());
        assert!(session.state().is_main_menu());
    }

    #[test]
    fn test_start_spawns_first_piece_once() {
        let mut session = started();
        assert!(session.state().is_playing());
        assert_eq!(origin(&session), crate::Point::new(4, 0));
        assert!(!session.start(5).unwrap());
    }

    #[test]
    fn test_gravity_waits_for_full_interval() {
        let mut session = started();
        session.update(999).unwrap();
        assert_eq!(origin(&session).y, 0);
        session.update(1000).unwrap();
        assert_eq!(origin(&session).y, 1);
        session.update(1500).unwrap();
        assert_eq!(origin(&session).y, 1);
        session.update(2000).unwrap();
        assert_eq!(origin(&session).y, 2);
    }

    #[test]
    fn test_narrowest_valid_board_survives_first_gravity_step() {
        let config = GameConfig {
            num_cols: 4,
            spawn_point: crate::Point::new(1, 0),
            ..GameConfig::default()
        };
        config.validate().unwrap();
        for byte in 0..20 {
            let mut session = GameSession::new(config.clone(), PieceSeed::from_bytes([byte; 16]));
            session.start(0).unwrap();
            session.update(1000).unwrap();
            assert!(session.state().is_playing(), "seed byte {byte}");
            assert_eq!(origin(&session).y, 1);
        }
    }

    #[test]
    fn test_gravity_freezes_landed_piece() {
        let mut session = started();
        for tick in 1..=40 {
            session.update(tick * 1000).unwrap();
        }
        assert!(session.stats().completed_pieces() >= 1);
        assert!(session.field().board().cells().any(|c| c.is_filled()));
        assert_eq!(session.stats().score(), 0);
    }

    #[test]
    fn test_soft_drop_scores_each_step() {
        let mut session = started();
        assert!(session.soft_drop());
        assert!(session.soft_drop());
        assert_eq!(session.stats().score(), 2);
        assert_eq!(origin(&session).y, 2);
    }

    #[test]
    fn test_hard_drop_freezes_and_spawns() {
        let mut session = started();
        assert!(session.hard_drop(100).unwrap());
        assert_eq!(session.stats().score(), 19);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(origin(&session), crate::Point::new(4, 0));
        assert_eq!(
            session.field().board().cells().filter(|c| c.is_filled()).count(),
            4
        );
        // gravity restarts from the hard drop
        session.update(1050).unwrap();
        assert_eq!(origin(&session).y, 0);
    }

    #[test]
    fn test_line_clear_scores_flat_hundred() {
        let mut session = started();
        let gaps: Vec<i32> = session
            .field()
            .current_piece()
            .unwrap()
            .blocks()
            .iter()
            .filter(|p| p.y == 0)
            .map(|p| p.x)
            .collect();
        let board = session.field_mut().board_mut();
        for x in (0..10).filter(|x| !gaps.contains(x)) {
            board.set(x, 19, crate::Cell::Filled(crate::Color::WHITE)).unwrap();
        }

        session.hard_drop(0).unwrap();
        let stats = session.stats();
        assert_eq!(stats.total_cleared_lines(), 1);
        assert_eq!(stats.score(), 19 + 100);
        let board = session.field().board();
        assert_eq!(board.num_rows(), 20);
        assert!(board.get_row(0).unwrap().iter().all(|c| c.is_empty()));
        assert!(board.cells().filter(|c| c.is_filled()).count() < 4);
    }

    #[test]
    fn test_pause_stops_gravity_and_resume_restarts_interval() {
        let mut session = started();
        assert!(session.apply(Action::TogglePause, 500).unwrap());
        assert!(session.state().is_paused());
        assert!(!session.move_left());
        session.update(5000).unwrap();
        assert_eq!(origin(&session).y, 0);

        assert!(session.toggle_pause(6000));
        session.update(6999).unwrap();
        assert_eq!(origin(&session).y, 0);
        session.update(7000).unwrap();
        assert_eq!(origin(&session).y, 1);
    }

    #[test]
    fn test_hold_once_per_turn() {
        let mut session = started();
        assert!(session.hold().unwrap());
        assert!(!session.hold().unwrap());
        session.hard_drop(0).unwrap();
        assert!(session.field().can_hold());
    }

    #[test]
    fn test_stacking_ends_the_game() {
        let mut session = started();
        for _ in 0..100 {
            if session.state().is_game_over() {
                break;
            }
            session.hard_drop(0).unwrap();
        }
        assert!(session.state().is_game_over());
        assert!(matches!(
            session.game_over_reason(),
            Some(GameOverReason::SpawnBlocked | GameOverReason::FrozenOutside)
        ));
        assert!(!session.hard_drop(0).unwrap());
        assert!(!session.quit());
    }

    #[test]
    fn test_quit() {
        let mut session = started();
        assert!(session.apply(Action::Quit, 0).unwrap());
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.game_over_reason(), Some(GameOverReason::Quit));
    }

    #[test]
    fn test_quit_from_main_menu() {
        let mut session = GameSession::new(GameConfig::default(), SEED);
        assert!(session.quit());
        assert!(session.state().is_game_over());
    }
}
