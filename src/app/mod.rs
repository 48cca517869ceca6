//! Application layer: the search state machine.
//!
//! Sits between the plugin shim (`main.rs`) and the search, worker and UI
//! layers, with a unidirectional data flow:
//!
//! ```text
//! User Input → Events → handle_event → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Web replies / Worker replies ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Search phase and behaviour mode types
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, Key};
pub use modes::{Phase, ResultsMode, WebAccess};
pub use state::{AppOptions, AppState};
