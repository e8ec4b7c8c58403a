/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        crossterm::style::Color::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

/// Page background behind every panel.
pub(crate) const PAGE_BACKGROUND: Color = Color::new(243, 240, 236);

/// Primary ink for headlines and ability names.
pub(crate) const INK: Color = Color::new(23, 23, 23);

/// Muted gray for labels and navigation.
pub(crate) const MUTED: Color = Color::new(107, 114, 128);

/// Slightly darker gray for body copy.
pub(crate) const BODY: Color = Color::new(55, 65, 81);

/// Neutral color for inactive progress indicator segments.
pub(crate) const INACTIVE_SEGMENT: Color = Color::new(209, 213, 219);
