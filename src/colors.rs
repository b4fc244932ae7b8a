use is_terminal::IsTerminal;

use crate::cli::ColorMode;
use loglyzer::Level;

/// ANSI color codes for the text report
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: &'static str,      // Bold for section titles
    pub level_debug: &'static str, // Bright cyan for debug levels
    pub level_info: &'static str,  // Bright green for info levels
    pub level_warn: &'static str,  // Bright yellow for warning levels
    pub level_error: &'static str, // Bright red for error levels
    pub reset: &'static str,       // Reset to default color
}

impl ColorScheme {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                header: "\x1b[1m",
                level_debug: "\x1b[96m",
                level_info: "\x1b[92m",
                level_warn: "\x1b[93m",
                level_error: "\x1b[91m",
                reset: "\x1b[0m",
            }
        } else {
            // All empty strings for no-color mode
            Self {
                header: "",
                level_debug: "",
                level_info: "",
                level_warn: "",
                level_error: "",
                reset: "",
            }
        }
    }

    pub fn level(&self, level: Level) -> &'static str {
        match level {
            Level::Debug => self.level_debug,
            Level::Info => self.level_info,
            Level::Warning => self.level_warn,
            Level::Error => self.level_error,
        }
    }

    /// `text` wrapped in the color for `level`
    pub fn paint_level(&self, level: Level, text: &str) -> String {
        format!("{}{}{}", self.level(level), text, self.reset)
    }
}

/// Determine if colors should be used based on CLI color mode and environment
///
/// Colors only ever apply to stdout; a report written with `--output` is plain.
pub fn should_use_colors(mode: ColorMode, writing_to_file: bool) -> bool {
    if writing_to_file {
        return false;
    }
    match mode {
        ColorMode::Never => false,
        // Even with Always, respect NO_COLOR
        ColorMode::Always => std::env::var_os("NO_COLOR").is_none(),
        ColorMode::Auto => {
            if !std::io::stdout().is_terminal() {
                return false;
            }
            // https://no-color.org/
            std::env::var_os("NO_COLOR").is_none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_scheme_is_empty() {
        let scheme = ColorScheme::new(false);
        assert_eq!(scheme.paint_level(Level::Error, "ERROR"), "ERROR");
    }

    #[test]
    fn test_colored_scheme_wraps_levels() {
        let scheme = ColorScheme::new(true);
        assert_eq!(scheme.paint_level(Level::Error, "ERROR"), "\x1b[91mERROR\x1b[0m");
        assert_eq!(scheme.level(Level::Warning), "\x1b[93m");
    }

    #[test]
    fn test_file_output_never_colored() {
        assert!(!should_use_colors(ColorMode::Always, true));
        assert!(!should_use_colors(ColorMode::Never, false));
    }
}
