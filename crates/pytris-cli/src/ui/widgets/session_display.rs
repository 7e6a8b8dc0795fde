use pytris_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Color,
    text::Line,
    widgets::{Block, Padding, Widget},
};

use crate::ui::widgets::{
    BoardDisplay, MessageDisplay, PieceDisplay, PieceStackDisplay, SessionStatsDisplay, color,
    style,
};

/// Hold slot and stats on the left, the board in the middle, the next-up queue
/// on the right, with a banner over the board outside of play.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn border_color(&self) -> Color {
        match self.session.state() {
            SessionState::MainMenu | SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn panel(&self, title: &'a str) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }

    fn board(&self) -> BoardDisplay<'a> {
        let field = self.session.field();
        BoardDisplay::new(field.board())
            .falling_piece(field.current_piece())
            .block(
                Block::bordered()
                    .border_style(self.border_color())
                    .style(style::DEFAULT),
            )
    }

    fn hold_panel(&self) -> PieceDisplay<'a> {
        PieceDisplay::new()
            .piece(self.session.field().held_piece())
            .block(self.panel("HOLD"))
    }

    fn piece_stack(&self) -> PieceStackDisplay<'a> {
        PieceStackDisplay::new(self.session.field().next_pieces()).block(self.panel("NEXT"))
    }

    /// Rows needed to show everything.
    pub fn height(&self) -> u16 {
        let left = self.hold_panel().height()
            + 1
            + SessionStatsDisplay::new(self.session)
                .block(self.panel("STATS"))
                .height();
        self.board()
            .height()
            .max(left)
            .max(self.piece_stack().height())
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game_board = self.board();
        let hold_panel = self.hold_panel();
        let piece_stack = self.piece_stack();
        let session_stats = SessionStatsDisplay::new(self.session).block(self.panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), session_stats.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(piece_stack.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(session_stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(session_stats.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [piece_stack_area] =
            Layout::vertical([Constraint::Length(piece_stack.height())]).areas(right_column);

        let game_board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        piece_stack.render(piece_stack_area, buf);

        let message = match self.session.state() {
            SessionState::MainMenu => Some(("PRESS ANY KEY", style::MENU_POPUP)),
            SessionState::Playing => None,
            SessionState::Paused => Some(("PAUSED", style::PAUSE_POPUP)),
            SessionState::GameOver => Some(("GAME OVER", style::GAME_OVER_POPUP)),
        };
        if let Some((text, style)) = message {
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(MessageDisplay::height()),
            );
            MessageDisplay::new(text, style).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use pytris_engine::{GameConfig, PieceSeed};

    use super::*;

    fn render(session: &GameSession) -> String {
        let display = SessionDisplay::new(session);
        let area = Rect::new(0, 0, 80, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_banner_follows_state() {
        let mut session = GameSession::new(GameConfig::default(), PieceSeed::from_bytes([1; 16]));
        assert!(render(&session).contains("PRESS ANY KEY"));

        session.start(0).unwrap();
        let playing = render(&session);
        assert!(!playing.contains("PRESS ANY KEY"));
        assert!(playing.contains("NEXT"));
        assert!(playing.contains("SCORE:"));
        assert!(playing.contains("SINGLES:"));
        assert!(playing.contains("TETRIS:"));

        session.toggle_pause(10);
        assert!(render(&session).contains("PAUSED"));

        session.quit();
        assert!(render(&session).contains("GAME OVER"));
    }

    #[test]
    fn test_height_fits_the_board() {
        let session = GameSession::new(GameConfig::default(), PieceSeed::from_bytes([1; 16]));
        assert_eq!(SessionDisplay::new(&session).height(), 22);
    }
}
