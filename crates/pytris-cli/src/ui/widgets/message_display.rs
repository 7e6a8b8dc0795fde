use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Clear, Widget},
};

/// A three-row banner with centered text, drawn over whatever is below it.
#[derive(Debug)]
pub struct MessageDisplay<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> MessageDisplay<'a> {
    pub fn new(text: &'a str, style: Style) -> Self {
        Self { text, style }
    }

    pub fn height() -> u16 {
        3
    }
}

impl Widget for MessageDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::new().style(self.style);
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Text::styled(self.text, self.style)
            .centered()
            .render(inner.centered_vertically(Constraint::Length(1)), buf);
    }
}
