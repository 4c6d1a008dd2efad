//! UI Theme - status icons and colors

use crossterm::style::Color;

/// Visual constants for status lines.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub icons: Icons,
    pub colors: ColorScheme,
}

/// Status icons for different severities
#[derive(Debug, Clone)]
pub struct Icons {
    /// Success/completed state (✓)
    pub success: &'static str,
    /// Error/failed state (✗)
    pub error: &'static str,
    /// Warning state (⚠)
    pub warning: &'static str,
    /// Info state (ℹ)
    pub info: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            success: "✓",
            error: "✗",
            warning: "⚠",
            info: "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            info: Color::DarkGrey,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}
