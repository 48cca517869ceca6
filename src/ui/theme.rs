//! Color themes and ANSI escape sequence generation.
//!
//! Four Catppuccin flavours ship inside the binary; any other palette can be
//! loaded from a TOML file with the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! # header_bg = "#1e1e2e"   (optional)
//! clear_fg = "#f38ba8"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! tile_border = "#cba6f7"
//! input_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! hint_fg = "#89b4fa"
//! spinner_fg = "#94e2d5"
//! ```
//!
//! Colors are emitted as 24-bit SGR sequences. Unparseable hex falls back to
//! white rather than failing the render.

use crate::domain::{JiffyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Built-in themes as `(name, TOML source)`.
const BUILTIN: &[(&str, &str)] = &[
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

const SGR_RESET: &str = "\u{1b}[0m";
const SGR_BOLD: &str = "\u{1b}[1m";

/// A named palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every painted element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title text.
    pub header_fg: String,
    /// Header line background; unset leaves the terminal background.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// The clear control shown in place of the title.
    pub clear_fg: String,

    pub text_normal: String,
    /// Footer, URLs and the input placeholder.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,
    pub tile_border: String,
    pub input_border: String,

    /// Fuzzy match highlight in tile titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub hint_fg: String,
    pub spinner_fg: String,
}

impl Theme {
    /// Looks up a built-in theme, returning `None` for unknown names.
    ///
    /// ```rust
    /// use jiffy::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").map(|t| t.name).as_deref(), Some("catppuccin-latte"));
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, source) = BUILTIN.iter().find(|(builtin, _)| *builtin == name)?;
        toml::from_str(source).ok()
    }

    /// Names of the built-in themes.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`JiffyError::Theme`] if the file cannot be read or does not
    /// describe a complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| JiffyError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| JiffyError::Theme(format!("cannot parse {}: {e}", path.display())))
    }

    /// Foreground color sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = parse_hex(hex).unwrap_or((255, 255, 255));
        format!("\u{1b}[38;2;{r};{g};{b}m")
    }

    /// Background color sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = parse_hex(hex).unwrap_or((255, 255, 255));
        format!("\u{1b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        SGR_BOLD
    }

    /// Clears every attribute set so far.
    #[must_use]
    pub const fn reset() -> &'static str {
        SGR_RESET
    }
}

impl Default for Theme {
    /// The `catppuccin-mocha` palette.
    ///
    /// # Panics
    ///
    /// Only if the embedded TOML is broken, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("embedded default theme parses")
    }
}

/// Parses `#rrggbb` (the `#` is optional).
fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_theme_parses() {
        for name in Theme::builtin_names() {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert!(theme.colors.header_bg.is_none());
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn hex_colors_become_truecolor_sequences() {
        assert_eq!(Theme::fg("#cdd6f4"), "\u{1b}[38;2;205;214;244m");
        assert_eq!(Theme::bg("1e1e2e"), "\u{1b}[48;2;30;30;46m");
    }

    #[test]
    fn bad_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("#12345g"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn custom_theme_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut contents = include_str!("../../themes/catppuccin-latte.toml").replace("catppuccin-latte", "custom");
        contents.push_str("header_bg = \"#000000\"\n");
        fs::write(&path, contents).unwrap();

        let theme = Theme::from_file(&path).unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.colors.header_bg.as_deref(), Some("#000000"));
    }

    #[test]
    fn missing_or_incomplete_theme_file_is_a_theme_error() {
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(JiffyError::Theme(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "name = \"partial\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap();
        assert!(matches!(Theme::from_file(&path), Err(JiffyError::Theme(_))));
    }
}
