/// An opaque RGB color.
///
/// The engine never interprets colors; it only carries them from piece kinds
/// into frozen board cells so the renderer can draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const CYAN: Self = Self::rgb(43, 172, 226);
    pub const YELLOW: Self = Self::rgb(253, 225, 2);
    pub const ORANGE: Self = Self::rgb(247, 150, 34);
    pub const GREEN: Self = Self::rgb(77, 184, 72);
    pub const PURPLE: Self = Self::rgb(146, 44, 140);
    pub const BLUE: Self = Self::rgb(0, 90, 156);
    pub const RED: Self = Self::rgb(238, 40, 51);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
