//! Light and dark colour schemes for the terminal user interface.

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Brand green used for the submit label and success messages.
pub const LEAF_GREEN: Color = Color::Rgb(76, 175, 80);
/// Used for the edit key hint.
pub const AMBER: Color = Color::Rgb(240, 173, 78);
/// Used for error messages and the delete key hint.
pub const BRICK_RED: Color = Color::Rgb(217, 83, 79);

/// Selected colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colours resolved for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub success_bg: Color,
    pub success_fg: Color,
    pub error_bg: Color,
    pub error_fg: Color,
}

impl Theme {
    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::Rgb(250, 250, 250),
                foreground: Color::Rgb(33, 33, 33),
                muted: Color::Rgb(136, 136, 136),
                border: Color::Rgb(204, 204, 204),
                highlight_bg: Color::Rgb(224, 224, 224),
                highlight_fg: Color::Black,
                success_bg: Color::Rgb(223, 240, 216),
                success_fg: Color::Rgb(60, 118, 61),
                error_bg: Color::Rgb(242, 222, 222),
                error_fg: Color::Rgb(169, 68, 66),
            },
            Self::Dark => Palette {
                background: Color::Rgb(30, 30, 30),
                foreground: Color::Rgb(230, 230, 230),
                muted: Color::Rgb(120, 120, 120),
                border: Color::Rgb(68, 68, 68),
                highlight_bg: Color::Rgb(60, 60, 60),
                highlight_fg: Color::White,
                success_bg: Color::Rgb(30, 70, 32),
                success_fg: Color::Rgb(200, 230, 201),
                error_bg: Color::Rgb(90, 30, 30),
                error_fg: Color::Rgb(255, 205, 210),
            },
        }
    }
}
