//! Color values for metrics, annotations and widget chrome.
//!
//! The dashboard wire format carries colors as `#RRGGBB` hex strings. [`Color`]
//! stores the three channels and serializes to exactly that spelling, so a
//! typo'd color string is a construction error instead of a silently broken
//! document.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a color from a hex string.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ColorParseError {
    /// The string did not start with `#`.
    #[error("Invalid hex color format: '{0}' (expected leading '#')")]
    InvalidHexFormat(String),
    /// The string was not seven characters (`#` plus six hex digits).
    #[error("Invalid hex color length: '{0}' (expected #RRGGBB)")]
    InvalidHexLength(String),
    /// A character was not a hexadecimal digit.
    #[error("Invalid hex digit in color '{value}'")]
    InvalidHexDigit { value: String },
}

/// An RGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    // The standard chart palette.
    pub const BLUE: Color = Color::rgb(0x1f, 0x77, 0xb4);
    pub const BROWN: Color = Color::rgb(0x8c, 0x56, 0x4b);
    pub const GREEN: Color = Color::rgb(0x2c, 0xa0, 0x2c);
    pub const GREY: Color = Color::rgb(0x7f, 0x7f, 0x7f);
    pub const ORANGE: Color = Color::rgb(0xff, 0x7f, 0x0e);
    pub const PINK: Color = Color::rgb(0xe3, 0x77, 0xc2);
    pub const PURPLE: Color = Color::rgb(0x94, 0x67, 0xbd);
    pub const RED: Color = Color::rgb(0xd6, 0x27, 0x28);

    /// Creates a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses a `#RRGGBB` hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let Some(digits) = hex.strip_prefix('#') else {
            return Err(ColorParseError::InvalidHexFormat(hex.to_string()));
        };
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidHexLength(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError::InvalidHexDigit {
                value: hex.to_string(),
            })
        };
        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Formats this color as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl<'de> Visitor<'de> for HexVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a color string in #RRGGBB form")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
                Color::from_hex(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}
