//! Color tokens for the dashboard.
//!
//! High-contrast terminal palette: cyan accents on a dark background, green
//! for gains, pink for losses, orange for warnings.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Focus and borders.
    pub accent: Color,
    /// Gains, success.
    pub positive: Color,
    /// Losses, failures.
    pub negative: Color,
    /// Retry/fallback notices.
    pub warning: Color,
    /// Secondary text, separators.
    pub muted: Color,
    /// Primary text.
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text: Color::White,
        }
    }
}
