//! Terminal rendering for the plugin pane.
//!
//! Rendering is a pure projection of state: `AppState::compute_viewmodel`
//! produces a [`UIViewModel`] and the [`components`] print it as ANSI text.
//! Nothing in this layer mutates application state.
//!
//! - [`viewmodel`]: display-ready snapshot types
//! - [`renderer`]: entry point called from the plugin's `render`
//! - [`components`]: header, tile grid, input box, hint line, footer
//! - [`helpers`]: cursor movement, truncation, match highlighting
//! - [`theme`]: palettes and SGR sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{FooterInfo, GridLayout, HeaderInfo, HintInfo, InputInfo, TileItem, UIViewModel, SPINNER_FRAMES};
