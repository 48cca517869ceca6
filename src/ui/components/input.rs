//! Search input component renderer.
//!
//! Draws the term being typed inside a three-line frame, or the dimmed
//! placeholder while the term is empty.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputInfo;

/// Horizontal margin for the input box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 2;

/// Renders the input box starting at `row` and returns the row after it.
///
/// ```text
///   ┌──────────────────────┐
///   │ > happy cat▏         │
///   └──────────────────────┘
/// ```
pub fn render_input(row: usize, input: &InputInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(INPUT_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.input_border);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    // " > " prefix and the cursor bar take four cells.
    let text = if input.is_placeholder {
        truncate(&input.text, inner_width.saturating_sub(4))
    } else {
        // Keep the tail visible while typing past the box edge.
        let limit = inner_width.saturating_sub(4);
        let count = input.text.chars().count();
        input.text.chars().skip(count.saturating_sub(limit)).collect()
    };
    let text_fg = if input.is_placeholder {
        &theme.colors.text_dim
    } else {
        &theme.colors.text_normal
    };
    let cursor = if input.is_placeholder { " " } else { "▏" };
    let used = text.chars().count() + 4;

    position_cursor(row + 1, 1);
    print!("{margin}{border}│");
    print!("{} > {text}{cursor}", Theme::fg(text_fg));
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
