use pytris_engine::{Cell, PieceKind, Point};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// A piece kind drawn in its spawn orientation, centered in a 4x2 cell box.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Option<PieceKind>) -> Self {
        Self { piece, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Top-left corner and size (in cells) of the template's bounding box.
fn bounds(kind: PieceKind) -> (Point, u16, u16) {
    let offsets = &kind.template().offsets;
    let min_x = offsets.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = offsets.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = offsets.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = offsets.iter().map(|p| p.y).max().unwrap_or(0);
    let width = u16::try_from(max_x - min_x + 1).unwrap_or(0);
    let height = u16::try_from(max_y - min_y + 1).unwrap_or(0);
    (Point::new(min_x, min_y), width, height)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.piece else {
            return;
        };
        let (corner, width, height) = bounds(kind);
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let horizontal = Layout::horizontal(
            (0..width).map(|_| Constraint::Length(BlockDisplay::width())),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..height).map(|_| Constraint::Length(BlockDisplay::height())));
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let offsets = &kind.template().offsets;
        let occupied = BlockDisplay::from_cell(Cell::Filled(kind.color()), false);
        let empty = BlockDisplay::from_cell(Cell::Empty, false);
        for (y, grid_row) in (corner.y..).zip(grid_rows) {
            for (x, grid_cell) in (corner.x..).zip(grid_row) {
                if offsets.contains(&Point::new(x, y)) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}
