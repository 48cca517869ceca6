//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the search UI: the typed
//! term, the hint line, the loading flag and the accumulated clips, together
//! with the search [`Phase`] that guards against overlapping requests. It has a
//! single writer, the event handler, and is read by the renderer through
//! [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use jiffy::app::{AppOptions, AppState};
//! use jiffy::search::SearchClient;
//! use jiffy::ui::Theme;
//!
//! let mut state = AppState::new(SearchClient::default(), AppOptions::default(), Theme::default());
//! state.text_changed("cat".to_string());
//! assert_eq!(state.hint_text, "Hit enter to search cat");
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.tiles.is_empty());
//! ```

use super::modes::{Phase, ResultsMode, WebAccess};
use crate::domain::{Clip, SearchOutcome};
use crate::search::SearchClient;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    FooterInfo, GridLayout, HeaderInfo, HintInfo, InputInfo, TileItem, UIViewModel, SPINNER_FRAMES,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Terms must be longer than this many characters to be searchable.
pub const MIN_TERM_CHARS: usize = 2;

/// Hint shown while the term is too short.
///
/// A single space rather than an empty string, so the hint line keeps its
/// height while the user is typing.
pub const BLANK_HINT: &str = " ";

/// Hint shown when the host refused the web access permission.
pub const NO_WEB_ACCESS_HINT: &str = "Web access was not granted";

/// Placeholder shown in the empty input box.
pub const INPUT_PLACEHOLDER: &str = "Type something";

/// Title shown in the header while there is nothing to clear.
pub const TITLE: &str = "Jiffy";

/// Header control shown once there are results to clear.
pub const CLEAR_CONTROL: &str = "[x] clear (Ctrl+x)";

/// Rows used by everything except the tile grid.
const CHROME_ROWS: usize = 10;

/// Rows used by one tile (border, label, url, border).
const TILE_HEIGHT: usize = 4;

/// Narrowest a tile may get before the grid drops a column.
const TILE_MIN_WIDTH: usize = 30;

/// Behaviour switches chosen through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOptions {
    /// Whether successful searches append or replace.
    pub results_mode: ResultsMode,
    /// Whether the clear control is offered.
    pub clear_enabled: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            results_mode: ResultsMode::Accumulate,
            clear_enabled: true,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current contents of the input box.
    pub search_term: String,

    /// Status line under the input: prompt, outcome, or failure reason.
    pub hint_text: String,

    /// `true` exactly while a request is outstanding.
    pub loading: bool,

    /// Clips shown in the grid, oldest first.
    pub results: Vec<Clip>,

    /// Search request lifecycle.
    pub phase: Phase,

    /// Behaviour switches.
    pub options: AppOptions,

    /// Outcome of the web access permission request.
    pub web_access: WebAccess,

    /// Spinner animation counter, advanced by timer ticks while loading.
    pub spinner_tick: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Builds outbound requests.
    client: SearchClient,

    /// Sequence number handed to the next dispatched request.
    next_seq: u64,
}

impl AppState {
    /// Creates an idle state with an empty term, empty hint and no results.
    #[must_use]
    pub fn new(client: SearchClient, options: AppOptions, theme: Theme) -> Self {
        Self {
            search_term: String::new(),
            hint_text: String::new(),
            loading: false,
            results: Vec::new(),
            phase: Phase::Idle,
            options,
            web_access: WebAccess::Pending,
            spinner_tick: 0,
            theme,
            client,
            next_seq: 1,
        }
    }

    /// Returns the search client used to build requests.
    #[must_use]
    pub const fn client(&self) -> &SearchClient {
        &self.client
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        matches!(self.phase, Phase::Searching { .. })
    }

    /// Whether `value` is long enough to be searched.
    #[must_use]
    pub fn is_searchable(value: &str) -> bool {
        value.chars().count() > MIN_TERM_CHARS
    }

    /// Replaces the search term and recomputes the prompt hint.
    ///
    /// Leaves `loading` and `results` alone.
    pub fn text_changed(&mut self, value: String) {
        self.hint_text = if Self::is_searchable(&value) {
            format!("Hit enter to search {value}")
        } else {
            BLANK_HINT.to_string()
        };
        self.search_term = value;

        tracing::trace!(term = %self.search_term, "search term updated");
    }

    /// Enters the searching phase for `term` and returns the request's
    /// sequence number.
    ///
    /// Callers check [`is_searching`](Self::is_searching) first; the handler
    /// never calls this with a request already outstanding.
    pub fn begin_search(&mut self, term: &str) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.phase = Phase::Searching {
            seq,
            term: term.to_string(),
        };
        self.loading = true;
        self.spinner_tick = 0;

        tracing::debug!(seq = seq, term = %term, "search dispatched");
        seq
    }

    /// Abandons the searching phase without an outcome.
    ///
    /// Used when the request could not be built at all.
    pub fn abort_search(&mut self, hint: String) {
        self.phase = Phase::Idle;
        self.loading = false;
        self.hint_text = hint;
    }

    /// Applies the outcome of request `seq`.
    ///
    /// Returns `false` and leaves the state untouched when `seq` is not the
    /// outstanding request (a stale reply, or nothing outstanding).
    pub fn resolve(&mut self, seq: u64, outcome: SearchOutcome) -> bool {
        let term = match &self.phase {
            Phase::Searching { seq: outstanding, term } if *outstanding == seq => term.clone(),
            _ => {
                tracing::debug!(seq = seq, outstanding = ?self.phase.outstanding_seq(), "discarding stale search reply");
                return false;
            }
        };

        match outcome {
            SearchOutcome::Success(clips) => {
                tracing::debug!(seq = seq, clip_count = clips.len(), mode = ?self.options.results_mode, "search resolved");
                match self.options.results_mode {
                    ResultsMode::Accumulate => self.results.extend(clips),
                    ResultsMode::Replace => self.results = clips,
                }
                self.hint_text = format!("Hit enter to see more {term}");
            }
            SearchOutcome::Failure(reason) => {
                tracing::debug!(seq = seq, reason = %reason, "search failed");
                self.hint_text = reason;
            }
        }

        self.phase = Phase::Idle;
        self.loading = false;
        true
    }

    /// Resets the term, hint and results.
    ///
    /// An outstanding request is abandoned: the phase returns to idle and its
    /// reply will be discarded as stale.
    pub fn clear(&mut self) {
        if let Some(seq) = self.phase.outstanding_seq() {
            tracing::debug!(seq = seq, "abandoning outstanding search on clear");
        }

        self.search_term.clear();
        self.hint_text.clear();
        self.results.clear();
        self.phase = Phase::Idle;
        self.loading = false;
    }

    /// Computes a renderable view model for a pane of `rows` x `cols` cells.
    ///
    /// # Layout
    ///
    /// Tiles are laid out in as many columns of at least 30 cells as fit. When
    /// the grid cannot hold every clip, the newest ones are shown and the
    /// header reports how many are hidden.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let columns = (cols / TILE_MIN_WIDTH).max(1);
        let tile_width = cols / columns;
        let grid_rows = rows.saturating_sub(CHROME_ROWS) / TILE_HEIGHT;
        let capacity = grid_rows * columns;

        let hidden = self.results.len().saturating_sub(capacity);
        let label_width = tile_width.saturating_sub(4);

        let matcher = if self.search_term.trim().is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let tiles = self.results[hidden..]
            .iter()
            .map(|clip| self.compute_tile(clip, label_width, matcher.as_ref()))
            .collect();

        UIViewModel {
            header: self.compute_header(hidden),
            tiles,
            grid: GridLayout { columns, tile_width },
            input: self.compute_input(),
            hint: self.compute_hint(),
            footer: self.compute_footer(),
        }
    }

    fn compute_tile(&self, clip: &Clip, width: usize, matcher: Option<&SkimMatcherV2>) -> TileItem {
        use fuzzy_matcher::FuzzyMatcher;

        let label = truncate(clip.label(), width);
        let visible = label.chars().count();

        let highlight_ranges = matcher
            .and_then(|m| m.fuzzy_indices(clip.label(), self.search_term.trim()))
            .map(|(_score, indices)| coalesce_ranges(&indices, visible))
            .unwrap_or_default();

        TileItem {
            label,
            url: truncate(&clip.media_url, width),
            highlight_ranges,
        }
    }

    fn compute_header(&self, hidden: usize) -> HeaderInfo {
        let is_clear_control = self.options.clear_enabled && !self.results.is_empty();

        let summary = match (self.results.len(), hidden) {
            (0, _) => None,
            (1, _) => Some("1 clip".to_string()),
            (n, 0) => Some(format!("{n} clips")),
            (n, h) => Some(format!("{n} clips, {h} hidden")),
        };

        HeaderInfo {
            title: if is_clear_control { CLEAR_CONTROL } else { TITLE }.to_string(),
            is_clear_control,
            summary,
        }
    }

    fn compute_input(&self) -> InputInfo {
        if self.search_term.is_empty() {
            InputInfo {
                text: INPUT_PLACEHOLDER.to_string(),
                is_placeholder: true,
            }
        } else {
            InputInfo {
                text: self.search_term.clone(),
                is_placeholder: false,
            }
        }
    }

    fn compute_hint(&self) -> HintInfo {
        if self.loading {
            HintInfo::Spinner(SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()])
        } else {
            HintInfo::Text(self.hint_text.clone())
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.options.clear_enabled {
            "Type to edit  Enter: search  Ctrl+x: clear  Esc: hide"
        } else {
            "Type to edit  Enter: search  Esc: hide"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Folds sorted character indices into `(start, end)` runs, dropping anything
/// at or past `limit`.
fn coalesce_ranges(indices: &[usize], limit: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &idx in indices.iter().filter(|&&i| i < limit) {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }

    ranges
}
