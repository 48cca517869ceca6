//! Hint line renderer: the spinner while loading, the hint text otherwise.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HintInfo;

pub fn render_hint(row: usize, hint: &HintInfo, theme: &Theme, cols: usize) -> usize {
    let (color, text) = match hint {
        HintInfo::Spinner(frame) => (&theme.colors.spinner_fg, format!("{frame} searching")),
        HintInfo::Text(text) => (&theme.colors.hint_fg, truncate(text, cols.saturating_sub(4))),
    };

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("    {text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count() + 4)));
    print!("{}", Theme::reset());
    row + 1
}
