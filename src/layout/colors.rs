//! Per-move colors, graded from the first move of a beta to the last.

use crate::error::{BetaError, Result};
use crate::types::{Move, MoveId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(BetaError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| BetaError::InvalidColor(s.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors. `t` is clamped into `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = BetaError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = BetaError;

    fn try_from(s: String) -> Result<Self> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_hex()
    }
}

/// Colors of the first and last move of a beta, plus the marker color for
/// start moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRange {
    pub first: Color,
    pub last: Color,
    pub start: Color,
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            first: Color::rgb(0xff, 0xeb, 0x3b),
            last: Color::rgb(0xf4, 0x43, 0x36),
            start: Color::rgb(0x21, 0x96, 0xf3),
        }
    }
}

/// How a single move is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveColor {
    /// Position in the beta, graded from first to last.
    pub primary: Color,

    /// Extra marker; set for start moves.
    pub secondary: Option<Color>,
}

/// Color each move by its position in the beta: the first move gets
/// `range.first`, the last gets `range.last`, everything between is
/// interpolated by order. Start moves also get `range.start` as their
/// secondary color.
pub fn move_colors(moves: &[Move], range: &ColorRange) -> HashMap<MoveId, MoveColor> {
    let span = moves.len().saturating_sub(1);
    moves
        .iter()
        .map(|mv| {
            // Map first=>0, last=>1, and avoid dividing by zero
            let t = if span > 0 {
                f64::from(mv.order.saturating_sub(1)) / span as f64
            } else {
                0.0
            };
            let color = MoveColor {
                primary: range.first.lerp(range.last, t),
                secondary: mv.is_start.then_some(range.start),
            };
            (mv.id.clone(), color)
        })
        .collect()
}
