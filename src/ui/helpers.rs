//! Shared rendering utilities and helpers.
//!
//! Everything here works on character indices rather than byte indices, so
//! clip titles with multi-byte characters truncate and highlight cleanly.

use crate::ui::theme::Theme;

/// Suffix appended to truncated text.
const ELLIPSIS: &str = "...";

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `width` characters.
///
/// Text that fits is returned unchanged. Longer text keeps as many leading
/// characters as fit before a trailing `...`; widths too small for the
/// ellipsis get a bare prefix instead.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    if width <= ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }

    let mut out: String = text.chars().take(width - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Sections outside `ranges` are printed in `base_fg`. Highlighted sections use
/// the theme's match colors. Ranges past the end of the text are clamped.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base_fg: &str) {
    print!("{}", Theme::fg(base_fg));

    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len()).max(start);

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
