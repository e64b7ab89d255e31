//! The closed set of favorite colors a person record may carry.

use std::fmt;

/// A favorite color, stored in the CSV sources as a numeric code and
/// displayed under its German name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Green,
    Violet,
    Red,
    Yellow,
    Turquoise,
    White,
}

impl Color {
    /// All colors, in code order.
    pub const ALL: [Color; 7] = [
        Color::Blue,
        Color::Green,
        Color::Violet,
        Color::Red,
        Color::Yellow,
        Color::Turquoise,
        Color::White,
    ];

    /// The numeric code used in the CSV sources (1-7).
    pub fn code(self) -> u32 {
        match self {
            Color::Blue => 1,
            Color::Green => 2,
            Color::Violet => 3,
            Color::Red => 4,
            Color::Yellow => 5,
            Color::Turquoise => 6,
            Color::White => 7,
        }
    }

    /// The German display name.
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "blau",
            Color::Green => "grün",
            Color::Violet => "violett",
            Color::Red => "rot",
            Color::Yellow => "gelb",
            Color::Turquoise => "türkis",
            Color::White => "weiß",
        }
    }

    /// Look up a color by its CSV code. Unknown codes are a validation
    /// failure at the caller, never a default.
    pub fn from_code(code: u32) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Look up a color by its exact German display name.
    pub fn from_name(name: &str) -> Option<Color> {
        Color::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
