//! Result grid renderer.
//!
//! Each clip gets a four-row framed tile: top border, title with fuzzy match
//! highlights, dimmed media URL, bottom border. Tiles fill rows left to right.

use crate::ui::helpers::{position_cursor, render_highlighted_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{GridLayout, TileItem};

/// Rows occupied by one tile.
pub const TILE_ROWS: usize = 4;

/// Renders `tiles` starting at `row` and returns the row after the last tile
/// row drawn.
pub fn render_grid(row: usize, tiles: &[TileItem], grid: GridLayout, theme: &Theme) -> usize {
    let columns = grid.columns.max(1);
    let mut current_row = row;

    for chunk in tiles.chunks(columns) {
        for (i, tile) in chunk.iter().enumerate() {
            render_tile(current_row, i * grid.tile_width + 1, tile, grid.tile_width, theme);
        }
        current_row += TILE_ROWS;
    }

    current_row
}

fn render_tile(row: usize, col: usize, tile: &TileItem, width: usize, theme: &Theme) {
    // Leave one cell between neighbouring tiles.
    let inner_width = width.saturating_sub(3);
    let border = Theme::fg(&theme.colors.tile_border);

    position_cursor(row, col);
    print!("{border}╭{}╮{}", "─".repeat(inner_width), Theme::reset());

    position_cursor(row + 1, col);
    print!("{border}│{}", Theme::reset());
    render_highlighted_text(&tile.label, &tile.highlight_ranges, theme, &theme.colors.text_normal);
    print!("{}", " ".repeat(inner_width.saturating_sub(tile.label.chars().count())));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, col);
    print!("{border}│{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", tile.url);
    print!("{}", " ".repeat(inner_width.saturating_sub(tile.url.chars().count())));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 3, col);
    print!("{border}╰{}╯{}", "─".repeat(inner_width), Theme::reset());
}
