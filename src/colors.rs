use is_terminal::IsTerminal;

use crate::config::ColorMode;

/// ANSI color codes for the console report
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub heading: &'static str, // Cyan for section headings
    pub label: &'static str,   // White for row labels
    pub number: &'static str,  // Yellow for counts and sizes
    pub percent: &'static str, // Green for percentages
    pub reset: &'static str,   // Reset to default color
}

impl ColorScheme {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                heading: "\x1b[36m", // Cyan for headings
                label: "\x1b[37m",   // White for labels
                number: "\x1b[33m",  // Yellow for numbers
                percent: "\x1b[32m", // Green for percentages
                reset: "\x1b[0m",    // Reset
            }
        } else {
            // All empty strings for no-color mode
            Self {
                heading: "",
                label: "",
                number: "",
                percent: "",
                reset: "",
            }
        }
    }
}

/// Resolve a color mode against the actual stdout stream.
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}
