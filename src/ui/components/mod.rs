//! Composable UI component renderers.
//!
//! - [`header`]: Title bar or clear control, with result count
//! - [`grid`]: Framed result tiles
//! - [`input`]: Search input box
//! - [`hint`]: Spinner or hint text
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Tile grid, top aligned]
//! [Blank padding]
//! [Input box - 3 lines]
//! [Hint]
//! [Border]
//! [Footer]
//! ```
//!
//! The input, hint and footer are anchored to the bottom of the pane so the
//! cursor stays put while results pile up above it.

mod footer;
mod grid;
mod header;
mod hint;
mod input;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use grid::render_grid;
use header::render_header;
use hint::render_hint;
use input::render_input;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout for a pane of `rows` x `cols` cells.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Row 1 stays blank.

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let _current_row = render_grid(current_row, &vm.tiles, vm.grid, theme);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let hint_row = border_row.saturating_sub(1);
    let input_row = hint_row.saturating_sub(3);

    render_input(input_row, &vm.input, theme, cols);
    render_hint(hint_row, &vm.hint, theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
