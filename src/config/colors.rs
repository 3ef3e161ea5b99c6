//! Display colors for notification cards.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

/// A 24-bit RGB color, serialized as the integer the Discord API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(0x492365)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_color_string(&s).map_err(de::Error::custom)
    }
}

/// Parse a color string.
///
/// Supports:
/// - Named colors: "Black", "White", "Red", "Green", "Blue", "Yellow", "Orange",
///   "Purple", "Gray", "Blurple"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color(0x000000)),
        "white" => Ok(Color(0xFFFFFF)),
        "red" => Ok(Color(0xED4245)),
        "green" => Ok(Color(0x57F287)),
        "blue" => Ok(Color(0x3498DB)),
        "yellow" => Ok(Color(0xFEE75C)),
        "orange" => Ok(Color(0xE67E22)),
        "purple" => Ok(Color(0x492365)),
        "gray" | "grey" => Ok(Color(0x95A5A6)),
        "blurple" => Ok(Color(0x5865F2)),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

/// Parse "#RRGGBB" and "#RGB".
fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid hex color: {}", s));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each digit, so F becomes FF
        3 => Ok(Color::rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}
