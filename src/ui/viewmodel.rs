//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: truncated labels, highlight
//! ranges, the grid geometry and the current spinner frame.

/// Braille spinner frames shown while a search is in flight.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar, or the clear control once results exist.
    pub header: HeaderInfo,

    /// Visible result tiles, oldest first.
    pub tiles: Vec<TileItem>,

    /// Grid geometry the tiles are laid out in.
    pub grid: GridLayout,

    /// Search input box.
    pub input: InputInfo,

    /// Hint line below the input.
    pub hint: HintInfo,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Text to display in the header.
    pub title: String,

    /// Whether the title is the clear control rather than the plugin name.
    pub is_clear_control: bool,

    /// Result count shown at the right edge, if there are results.
    pub summary: Option<String>,
}

/// A single result tile.
///
/// Both strings are already truncated to the tile's inner width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileItem {
    /// Clip title, or its ID when the title is blank.
    pub label: String,

    /// Media URL.
    pub url: String,

    /// Character ranges of `label` matching the current search term.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of tiles per row.
    pub columns: usize,

    /// Width of each tile in cells, borders included.
    pub tile_width: usize,
}

/// Search input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    /// Current search term, or the placeholder when the term is empty.
    pub text: String,

    /// Whether `text` is the placeholder.
    pub is_placeholder: bool,
}

/// What the hint line shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintInfo {
    /// A search is in flight; show this spinner frame.
    Spinner(&'static str),

    /// Show this hint text (may be a single space).
    Text(String),
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
