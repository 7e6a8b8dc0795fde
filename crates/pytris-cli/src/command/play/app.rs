use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pytris_engine::{Action, GameError, GameSession, SessionState};
use pytris_runtime::{App, Runtime};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tracing::{error, info};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

/// How long the game over message stays up without a key press.
const GAME_OVER_LINGER_MS: u64 = 1000;

const MAIN_MENU_BINDINGS: &[KeyBinding] = &[(&["any key"], "Start"), (&["Esc"], "Quit")];
const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["C"], "Hold"),
    (&["P"], "Pause"),
    (&["Esc", "Q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[(&["P"], "Resume"), (&["Esc", "Q"], "Quit")];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["any key"], "Exit")];

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    fps: f64,
    game_over_at: Option<u64>,
    is_exiting: bool,
    error: Option<GameError>,
}

impl PlayApp {
    pub fn new(session: GameSession, fps: f64) -> Self {
        Self {
            session,
            fps,
            game_over_at: None,
            is_exiting: false,
            error: None,
        }
    }

    /// Returns the error that stopped the game, if any.
    pub fn finish(self) -> anyhow::Result<()> {
        let stats = self.session.stats();
        info!(
            score = stats.score(),
            lines = stats.total_cleared_lines(),
            pieces = stats.completed_pieces(),
            "session finished"
        );
        match self.error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> Result<(), GameError> {
        if is_interrupt(key) {
            self.session.quit();
            self.is_exiting = true;
            return Ok(());
        }
        match self.session.state() {
            SessionState::MainMenu => {
                if key.code == KeyCode::Esc {
                    self.session.quit();
                    self.is_exiting = true;
                } else {
                    self.session.start(now_ms)?;
                }
            }
            SessionState::Playing | SessionState::Paused => {
                if key.code == KeyCode::Char('b') {
                    info!("board dump\n{}", self.session.field().board());
                } else if let Some(action) = action_for_key(key.code) {
                    _ = self.session.apply(action, now_ms)?;
                }
            }
            SessionState::GameOver => self.is_exiting = true,
        }
        Ok(())
    }

    fn record(&mut self, result: Result<(), GameError>) {
        if let Err(e) = result {
            error!(error = %e, "game stopped");
            self.error = Some(e);
            self.is_exiting = true;
        }
    }
}

fn is_interrupt(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Maps a key press during play to the action it triggers.
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Down => Action::SoftDrop,
        KeyCode::Up => Action::Rotate,
        KeyCode::Char(' ') => Action::HardDrop,
        KeyCode::Char('c' | 'C') => Action::Hold,
        KeyCode::Char('p' | 'P') => Action::TogglePause,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(self.fps);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            let result = self.handle_key(key, runtime.now_millis());
            self.record(result);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        let now_ms = runtime.now_millis();
        let result = self.session.update(now_ms);
        self.record(result);

        if self.session.state().is_game_over() {
            let since = *self.game_over_at.get_or_insert(now_ms);
            if now_ms.saturating_sub(since) >= GAME_OVER_LINGER_MS {
                self.is_exiting = true;
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = match self.session.state() {
            SessionState::MainMenu => MAIN_MENU_BINDINGS,
            SessionState::Playing => PLAYING_BINDINGS,
            SessionState::Paused => PAUSED_BINDINGS,
            SessionState::GameOver => GAME_OVER_BINDINGS,
        };
        let session_display = SessionDisplay::new(&self.session);
        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}
