//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Jiffy library and the Zellij plugin
//! system: it translates host events into library events, runs the actions the
//! library returns, and owns the only calls into the Zellij API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Zellij Main Thread      │
//! │  ┌────────────────────────┐  │
//! │  │     State (plugin)     │  │  ← UI state, web requests
//! │  └────────────────────────┘  │
//! │        │ IPC        ▲        │
//! │        ▼            │        │
//! │  ┌────────────────────────┐  │
//! │  │      JiffyWorker       │  │  ← Reply decoding
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key(Enter)` → `Event::SubmitRequested { key: Enter }`
//! - `Key(Ctrl+x)` → `Event::ClearRequested`
//! - `Key(Esc)` → `Event::CloseFocus`
//! - `Key(Backspace)` / `Key(Char)` → term edits
//! - `WebRequestResult` → `Event::ReplyReceived` (tag read from the context)
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `Timer` → `Event::Tick`
//! - `PermissionRequestResult` → `Event::PermissionsResult`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use jiffy::search::{RequestTag, SearchRequest};
use jiffy::worker::{JiffyWorker, WorkerMessage, WorkerResponse};
use jiffy::{handle_event, Action, Config, Event, Key};

register_plugin!(State);
register_worker!(JiffyWorker, jiffy_worker, JIFFY_WORKER);

/// Seconds between spinner frames.
const SPINNER_INTERVAL_SECS: f64 = 0.1;

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: jiffy::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Whether a spinner timer is already pending.
    timer_armed: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: jiffy::initialize(&Config::default()),
            worker_name: "jiffy".to_string(),
            timer_armed: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the app state, asks for web access and
    /// subscribes to the events the plugin reacts to.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        jiffy::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            has_api_key = config.search.api_key.is_some(),
            results = ?config.options.results_mode,
            clear = config.options.clear_enabled,
            "parsed configuration"
        );
        self.app = jiffy::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through `handle_event`, and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => {
                self.timer_armed = false;
                Event::Tick
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                let web_access = matches!(permissions, PermissionStatus::Granted);
                tracing::debug!(web_access = web_access, "permission request answered");
                Event::PermissionsResult { web_access }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        jiffy::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('x') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::ClearRequested);
        }

        Some(match key.bare_key {
            BareKey::Enter => Event::SubmitRequested {
                value: self.app.search_term.clone(),
                key: Key::Enter,
            },
            BareKey::Esc => Event::CloseFocus,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) && !key.has_modifiers(&[KeyModifier::Alt]) => {
                Event::Char(c)
            }
            _ => return None,
        })
    }

    /// Maps a web reply to an application event, dropping replies that carry
    /// no request tag.
    fn map_web_result_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(tag) = RequestTag::from_context(context) else {
            tracing::debug!(status = status, "web reply without a request tag");
            return None;
        };

        tracing::debug!(seq = tag.seq, status = status, body_len = body.len(), "web reply received");
        Some(Event::ReplyReceived { tag, status, body })
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes `message` as JSON and posts it to the worker thread.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Issues the GET for a search, tagging it so the reply can be matched.
    fn dispatch_search(request: &SearchRequest) {
        tracing::debug!(seq = request.tag.seq, term = %request.tag.term, "dispatching search");
        web_request(
            &request.url,
            HttpVerb::Get,
            BTreeMap::new(),
            Vec::new(),
            request.tag.to_context(),
        );
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::DispatchSearch(ref request) => Self::dispatch_search(request),
            Action::PostToWorker(ref message) => self.post_worker_message(message),
            Action::ScheduleTick => {
                if !self.timer_armed {
                    self.timer_armed = true;
                    set_timeout(SPINNER_INTERVAL_SECS);
                }
            }
        }
    }
}
