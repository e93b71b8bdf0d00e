//! Entity colors and the palettes new entities draw from

use core::fmt;
use core::str::FromStr;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TiltError;

/// sRGB color carried by every entity as its visual identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Self = Self::rgb(0xff, 0x00, 0x00);
    pub const YELLOW: Self = Self::rgb(0xff, 0xff, 0x00);
    pub const BLUE: Self = Self::rgb(0x00, 0x00, 0xff);
    pub const PURPLE: Self = Self::rgb(0x80, 0x00, 0x80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` / `rrggbb` or one of the named colors
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => return Some(Self::RED),
            "yellow" => return Some(Self::YELLOW),
            "blue" => return Some(Self::BLUE),
            "purple" => return Some(Self::PURPLE),
            _ => {}
        }

        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb` form for renderers
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = TiltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TiltError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = TiltError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Ordered set of colors to pick from when creating entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette; an empty list falls back to a single purple entry
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            log::warn!("Empty palette, falling back to purple");
            return Self { colors: vec![Color::PURPLE] };
        }
        Self { colors }
    }

    /// Colors used for rigid cubes
    pub fn cubes() -> Self {
        Self::new(vec![Color::RED, Color::YELLOW, Color::BLUE])
    }

    /// Colors used for bubbles
    pub fn bubbles() -> Self {
        Self::new(vec![
            Color::rgb(0xe5, 0x7e, 0xda),
            Color::rgb(0x75, 0xad, 0x64),
            Color::rgb(0x63, 0x61, 0xe3),
            Color::rgb(0xf5, 0x8a, 0x6b),
        ])
    }

    /// Color at `index`, wrapping around
    pub fn cycle(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Uniformly random color
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.colors[rng.gen_range(0..self.colors.len())]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::bubbles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_hex_and_named() {
        assert_eq!(Color::parse("#e57eda"), Some(Color::rgb(0xe5, 0x7e, 0xda)));
        assert_eq!(Color::parse("F58A6B"), Some(Color::rgb(0xf5, 0x8a, 0x6b)));
        assert_eq!(Color::parse("Red"), Some(Color::RED));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Color::rgb(0x63, 0x61, 0xe3).to_string(), "#6361e3");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::BLUE).unwrap();
        assert_eq!(json, "\"#0000ff\"");
        let back: Color = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(back, Color::YELLOW);
    }

    #[test]
    fn test_palette_cycle_and_pick() {
        let palette = Palette::cubes();
        assert_eq!(palette.cycle(0), Color::RED);
        assert_eq!(palette.cycle(4), Color::YELLOW);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(palette.colors().contains(&palette.pick(&mut rng)));
        }
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let palette = Palette::new(Vec::new());
        assert_eq!(palette.colors(), &[Color::PURPLE]);
    }
}
