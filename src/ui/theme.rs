//! Color themes.
//!
//! Themes form a closed set cycled in a fixed order. Each maps to a
//! [`ThemeStyle`] holding the colors every screen draws with.

use clap::ValueEnum;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selectable color theme.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Neon,
    Ocean,
}

/// Style tokens for a theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeStyle {
    /// Primary text (display, results).
    pub text: Color,
    /// Titles, operators, highlights.
    pub accent: Color,
    /// Labels, history, hints.
    pub muted: Color,
    pub error: Color,
    /// Shown on the theme toggle.
    pub glyph: &'static str,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::TrueColor { r, g, b }
}

impl Theme {
    /// Cycle order.
    pub const ORDER: [Theme; 4] = [Theme::Dark, Theme::Light, Theme::Neon, Theme::Ocean];

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Neon,
            Self::Neon => Self::Ocean,
            Self::Ocean => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Neon => "neon",
            Self::Ocean => "ocean",
        }
    }

    pub fn style(self) -> ThemeStyle {
        match self {
            Self::Dark => ThemeStyle {
                text: rgb(0xf3, 0xf4, 0xf6),
                accent: rgb(0xa7, 0x8b, 0xfa),
                muted: rgb(0x9c, 0xa3, 0xaf),
                error: rgb(0xf8, 0x71, 0x71),
                glyph: "☾",
            },
            Self::Light => ThemeStyle {
                text: rgb(0x11, 0x18, 0x27),
                accent: rgb(0x25, 0x63, 0xeb),
                muted: rgb(0x6b, 0x72, 0x80),
                error: rgb(0xdc, 0x26, 0x26),
                glyph: "☀",
            },
            Self::Neon => ThemeStyle {
                text: rgb(0xf0, 0xab, 0xfc),
                accent: rgb(0x22, 0xd3, 0xee),
                muted: rgb(0xa2, 0x1c, 0xaf),
                error: rgb(0xfa, 0xcc, 0x15),
                glyph: "⚡",
            },
            Self::Ocean => ThemeStyle {
                text: rgb(0xe0, 0xf2, 0xfe),
                accent: rgb(0x38, 0xbd, 0xf8),
                muted: rgb(0x7d, 0xd3, 0xfc),
                error: rgb(0xfb, 0x92, 0x3c),
                glyph: "≈",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
