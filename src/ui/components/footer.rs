//! Footer component renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Draws the keybinding help centered on `row`, shortened with an ellipsis
/// when the pane is too narrow.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help = truncate(&footer.keybindings, cols);
    let width = help.chars().count();
    let left = (cols - width) / 2;
    let right = cols - width - left;

    position_cursor(row, 1);
    print!(
        "{}{:left$}{help}{:right$}{}",
        Theme::fg(&theme.colors.text_dim),
        "",
        "",
        Theme::reset()
    );
    row + 1
}
