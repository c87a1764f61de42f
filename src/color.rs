//! Pen and fill colors.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::str::FromStr;

use lazy_static::lazy_static;
use thiserror::Error;

/// A 24-bit RGB color.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// The initial pen and fill color (`#00F`).
    pub const BLUE: Color = Color::new(0, 0, 0xFF);
}

impl Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a string is neither a known color name nor a hex
/// color value.
#[derive(Debug, PartialEq, Eq, Error)]
#[error("`{0}` is not a color name or `#RGB`/`#RRGGBB` value")]
pub struct ParseColorError(String);

lazy_static! {
    /// Table of color names accepted by `Color::from_str`.
    static ref NAMED_COLORS: HashMap<&'static str, Color> = {
        macro_rules! init_table {
            ( $( $name:literal => $color:expr ),* $(,)? ) => {
                {
                    let mut table = HashMap::new();

                    $(
                        table.insert($name, $color);
                    )*

                    table
                }
            }
        }

        init_table! {
            "black" => Color::new(0x00, 0x00, 0x00),
            "white" => Color::new(0xFF, 0xFF, 0xFF),
            "red" => Color::new(0xFF, 0x00, 0x00),
            "green" => Color::new(0x00, 0x80, 0x00),
            "lime" => Color::new(0x00, 0xFF, 0x00),
            "blue" => Color::new(0x00, 0x00, 0xFF),
            "yellow" => Color::new(0xFF, 0xFF, 0x00),
            "cyan" => Color::new(0x00, 0xFF, 0xFF),
            "magenta" => Color::new(0xFF, 0x00, 0xFF),
            "orange" => Color::new(0xFF, 0xA5, 0x00),
            "gray" => Color::new(0x80, 0x80, 0x80),
        }
    };
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }

        NAMED_COLORS
            .get(lower.as_str())
            .copied()
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Parses `RGB` or `RRGGBB` hex digits, without the leading `#`.
fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        // Single-digit channels repeat the digit: `#abc` is `#aabbcc`.
        3 => Some(Color::new(
            channel(&hex[0..1])? * 0x11,
            channel(&hex[1..2])? * 0x11,
            channel(&hex[2..3])? * 0x11,
        )),
        6 => Some(Color::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Color::new(0xAB, 0xCD, 0xEF)), "#abcdef");
        assert_eq!(format!("{:?}", Color::new(0x00, 0x00, 0x00)), "#000000");
    }

    #[test]
    fn parse_long_hex() {
        assert_eq!("#abcdef".parse(), Ok(Color::new(0xAB, 0xCD, 0xEF)));
        assert_eq!("#00F".parse(), Ok(Color::BLUE));
    }

    #[test]
    fn parse_short_hex() {
        assert_eq!("#f80".parse(), Ok(Color::new(0xFF, 0x88, 0x00)));
    }

    #[test]
    fn parse_named() {
        assert_eq!("blue".parse(), Ok(Color::BLUE));
        assert_eq!("Orange".parse(), Ok(Color::new(0xFF, 0xA5, 0x00)));
    }

    #[test]
    fn parse_unrecognized() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#xyz".parse::<Color>().is_err());
        assert!("blurple".parse::<Color>().is_err());
    }
}
