//! Header component renderer.
//!
//! Shows the plugin title, or the clear control once results exist, with the
//! result count right-aligned.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// ```text
/// [x] clear (Ctrl+x)                                      12 clips
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let summary = header.summary.as_deref().unwrap_or("");
    let summary_len = summary.chars().count();
    let title = truncate(&header.title, cols.saturating_sub(summary_len + 3));
    let title_len = title.chars().count();

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    let title_fg = if header.is_clear_control {
        &theme.colors.clear_fg
    } else {
        &theme.colors.header_fg
    };

    print!(" {}{}{title}{}", Theme::bold(), Theme::fg(title_fg), Theme::reset());
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    let gap = cols.saturating_sub(title_len + summary_len + 2);
    print!("{}", " ".repeat(gap));
    print!("{}{summary} ", Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
    row + 1
}
