//! Top-level rendering coordinator.
//!
//! Computes the view model from application state and hands it to the
//! component layer. Output goes to stdout as ANSI escape sequences; Zellij
//! clears the pane before each render.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols` cells.
///
/// # Example
///
/// ```rust
/// use jiffy::app::{AppOptions, AppState};
/// use jiffy::search::SearchClient;
/// use jiffy::ui::{render, Theme};
///
/// let state = AppState::new(SearchClient::default(), AppOptions::default(), Theme::default());
/// render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
