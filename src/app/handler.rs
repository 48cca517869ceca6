//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only writer of [`AppState`]. Each call reads the
//! previous state, applies one transition, and returns whether the pane needs
//! a re-render along with the side effects to run:
//!
//! ```text
//! Key / Timer / WebRequestResult / Worker reply
//!        │
//!        ▼
//!   handle_event ──▶ AppState mutation ──▶ (should_render, Vec<Action>)
//! ```
//!
//! # Example
//!
//! ```rust
//! use jiffy::app::{handle_event, AppOptions, AppState, Event};
//! use jiffy::search::SearchClient;
//! use jiffy::ui::Theme;
//!
//! let mut state = AppState::new(SearchClient::default(), AppOptions::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::TextChanged("cat".to_string()))?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), jiffy::JiffyError>(())
//! ```

use super::modes::WebAccess;
use super::state::NO_WEB_ACCESS_HINT;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::SearchOutcome;
use crate::search::RequestTag;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Key that accompanied a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The Enter key; the only key that submits.
    Enter,
    /// Any other key.
    Other,
}

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The input box now holds `value`.
    TextChanged(String),
    /// Appends a character to the current term.
    Char(char),
    /// Removes the last character of the current term.
    Backspace,

    /// A key was pressed while the input held `value`.
    SubmitRequested {
        /// Input contents at the time of the key press.
        value: String,
        /// Key that was pressed.
        key: Key,
    },

    /// A search reply arrived from the host and needs decoding.
    ReplyReceived {
        /// Tag the request was dispatched with.
        tag: RequestTag,
        /// HTTP status reported by the host.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// The outcome of request `seq` is known.
    SearchResolved {
        /// Sequence number of the request.
        seq: u64,
        /// What the request produced.
        outcome: SearchOutcome,
    },

    /// Clears the term, hint and results.
    ClearRequested,

    /// Spinner timer fired.
    Tick,

    /// Hides the plugin pane.
    CloseFocus,

    /// The host answered the permission request.
    PermissionsResult {
        /// Whether web access was granted.
        web_access: bool,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`: whether the pane needs to be redrawn and the
/// side effects to run, in order.
///
/// # Errors
///
/// No transition currently fails: undecodable replies and worker faults are
/// turned into failure hints on the outstanding search instead.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::TextChanged(value) => {
            state.text_changed(value.clone());
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            let mut value = state.search_term.clone();
            value.push(*c);
            state.text_changed(value);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.search_term.is_empty() {
                return Ok((false, vec![]));
            }
            let mut value = state.search_term.clone();
            value.pop();
            state.text_changed(value);
            Ok((true, vec![]))
        }
        Event::SubmitRequested { value, key } => Ok(submit(state, value, *key)),
        Event::ReplyReceived { tag, status, body } => {
            if state.phase.outstanding_seq() != Some(tag.seq) {
                tracing::debug!(seq = tag.seq, "reply for an abandoned search, not decoding");
                return Ok((false, vec![]));
            }

            let body = String::from_utf8(body.clone()).map_err(|e| {
                crate::JiffyError::Worker(format!("reply body for request {} is not UTF-8: {e}", tag.seq))
            });

            match body {
                Ok(body) => {
                    let message = WorkerMessage::resolve_search(
                        tag.seq,
                        tag.term.clone(),
                        *status,
                        body,
                        state.client().settings().error_hints,
                    );
                    Ok((false, vec![Action::PostToWorker(message)]))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "reply could not be forwarded to the worker");
                    let hint = state.client().failure_hint_for(&e.to_string());
                    let resolved = state.resolve(tag.seq, SearchOutcome::Failure(hint));
                    Ok((resolved, vec![]))
                }
            }
        }
        Event::SearchResolved { seq, outcome } => {
            let applied = state.resolve(*seq, outcome.clone());
            Ok((applied, vec![]))
        }
        Event::ClearRequested => {
            if !state.options.clear_enabled {
                tracing::debug!("clear requested but disabled by configuration");
                return Ok((false, vec![]));
            }
            state.clear();
            Ok((true, vec![]))
        }
        Event::Tick => {
            if !state.loading {
                return Ok((false, vec![]));
            }
            state.spinner_tick = state.spinner_tick.wrapping_add(1);
            Ok((true, vec![Action::ScheduleTick]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PermissionsResult { web_access } => {
            state.web_access = if *web_access {
                WebAccess::Granted
            } else {
                WebAccess::Denied
            };
            tracing::debug!(web_access = ?state.web_access, "permission result recorded");
            Ok((false, vec![]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::SearchCompleted { seq, outcome } => {
                let applied = state.resolve(*seq, outcome.clone());
                Ok((applied, vec![]))
            }
            WorkerResponse::Error { seq, message } => {
                tracing::error!("Worker error: {}", message);
                let Some(seq) = seq else {
                    return Ok((false, vec![]));
                };
                let hint = state.client().failure_hint_for(message);
                Ok((state.resolve(*seq, SearchOutcome::Failure(hint)), vec![]))
            }
        },
    }
}

/// Applies a submit attempt; a no-op unless Enter was pressed on a long
/// enough term while idle.
fn submit(state: &mut AppState, value: &str, key: Key) -> (bool, Vec<Action>) {
    if key != Key::Enter || !AppState::is_searchable(value) {
        return (false, vec![]);
    }

    if state.is_searching() {
        tracing::debug!(term = %value, "search already outstanding, ignoring submit");
        return (false, vec![]);
    }

    if state.web_access == WebAccess::Denied {
        state.hint_text = NO_WEB_ACCESS_HINT.to_string();
        return (true, vec![]);
    }

    let seq = state.begin_search(value);
    match state.client().request(seq, value) {
        Ok(request) => (true, vec![Action::DispatchSearch(request), Action::ScheduleTick]),
        Err(e) => {
            tracing::warn!(error = %e, "could not build search request");
            state.abort_search(e.to_string());
            (true, vec![])
        }
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::TextChanged(_) => "TextChanged",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SubmitRequested { .. } => "SubmitRequested",
        Event::ReplyReceived { .. } => "ReplyReceived",
        Event::SearchResolved { .. } => "SearchResolved",
        Event::ClearRequested => "ClearRequested",
        Event::Tick => "Tick",
        Event::CloseFocus => "CloseFocus",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::WorkerResponse(_) => "WorkerResponse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::{Phase, ResultsMode};
    use crate::app::state::{AppOptions, BLANK_HINT};
    use crate::domain::Clip;
    use crate::search::{ErrorHints, SearchClient, SearchSettings};
    use crate::ui::Theme;

    fn state() -> AppState {
        state_with(AppOptions::default())
    }

    fn state_with(options: AppOptions) -> AppState {
        let client = SearchClient::new(SearchSettings {
            api_key: Some("test-key".to_string()),
            ..SearchSettings::default()
        });
        AppState::new(client, options, Theme::default())
    }

    fn enter(value: &str) -> Event {
        Event::SubmitRequested {
            value: value.to_string(),
            key: Key::Enter,
        }
    }

    fn g1() -> Clip {
        Clip::new("g1", "https://x/g1.mp4", "")
    }

    fn dispatched_seq(actions: &[Action]) -> u64 {
        actions
            .iter()
            .find_map(|a| match a {
                Action::DispatchSearch(request) => Some(request.tag.seq),
                _ => None,
            })
            .expect("a search should have been dispatched")
    }

    #[test]
    fn typing_updates_term_and_hint_only() {
        let mut state = state();
        state.results = vec![g1()];

        handle_event(&mut state, &Event::TextChanged("cat".to_string())).unwrap();
        assert_eq!(state.search_term, "cat");
        assert_eq!(state.hint_text, "Hit enter to search cat");
        assert!(!state.loading);
        assert_eq!(state.results, vec![g1()]);
    }

    #[test]
    fn char_and_backspace_edit_the_term() {
        let mut state = state();
        for c in "cats".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.hint_text, "Hit enter to search cats");

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.search_term, "ca");
        assert_eq!(state.hint_text, BLANK_HINT);
    }

    #[test]
    fn backspace_on_empty_term_does_nothing() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::Backspace).unwrap(), (false, vec![]));
        assert_eq!(state.hint_text, "");
    }

    #[test]
    fn enter_from_idle_starts_searching() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &enter("cats")).unwrap();

        assert!(render);
        assert!(state.loading);
        assert!(matches!(state.phase, Phase::Searching { ref term, .. } if term == "cats"));
        let Action::DispatchSearch(request) = &actions[0] else {
            panic!("expected a dispatch, got {actions:?}");
        };
        assert!(request.url.contains("q=cats"));
        assert_eq!(request.tag.term, "cats");
        assert_eq!(actions[1], Action::ScheduleTick);
    }

    #[test]
    fn other_keys_do_not_submit() {
        let mut state = state();
        let event = Event::SubmitRequested {
            value: "cats".to_string(),
            key: Key::Other,
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        assert!(!state.loading);
    }

    #[test]
    fn submit_while_searching_is_a_no_op() {
        let mut state = state();
        handle_event(&mut state, &enter("cats")).unwrap();
        let before = (state.phase.clone(), state.hint_text.clone(), state.loading);

        let (render, actions) = handle_event(&mut state, &enter("dogs")).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!((state.phase.clone(), state.hint_text.clone(), state.loading), before);
    }

    #[test]
    fn success_appends_and_prompts_for_more() {
        let mut state = state();
        state.results = vec![Clip::new("g0", "https://x/g0.mp4", "")];
        let (_, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        let seq = dispatched_seq(&actions);

        let (render, _) = handle_event(
            &mut state,
            &Event::SearchResolved {
                seq,
                outcome: SearchOutcome::Success(vec![g1()]),
            },
        )
        .unwrap();

        assert!(render);
        assert!(!state.loading);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.results[1], g1());
        assert_eq!(state.hint_text, "Hit enter to see more cats");
    }

    #[test]
    fn follow_up_hint_uses_the_dispatched_term() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        handle_event(&mut state, &Event::TextChanged("dogs".to_string())).unwrap();

        handle_event(
            &mut state,
            &Event::SearchResolved {
                seq: dispatched_seq(&actions),
                outcome: SearchOutcome::Success(vec![g1()]),
            },
        )
        .unwrap();
        assert_eq!(state.hint_text, "Hit enter to see more cats");
        assert_eq!(state.search_term, "dogs");
    }

    #[test]
    fn failure_keeps_results_and_shows_reason() {
        let mut state = state();
        state.results = vec![g1()];
        let (_, actions) = handle_event(&mut state, &enter("xyz")).unwrap();

        handle_event(
            &mut state,
            &Event::SearchResolved {
                seq: dispatched_seq(&actions),
                outcome: SearchOutcome::Failure("Nothing found for xyz".to_string()),
            },
        )
        .unwrap();

        assert!(!state.loading);
        assert_eq!(state.results, vec![g1()]);
        assert_eq!(state.hint_text, "Nothing found for xyz");
    }

    #[test]
    fn clear_resets_from_any_state() {
        let mut state = state();
        state.results = vec![g1(), g1()];
        handle_event(&mut state, &Event::TextChanged("cats".to_string())).unwrap();

        handle_event(&mut state, &Event::ClearRequested).unwrap();
        assert_eq!(state.search_term, "");
        assert_eq!(state.hint_text, "");
        assert!(state.results.is_empty());

        handle_event(&mut state, &enter("cats")).unwrap();
        handle_event(&mut state, &Event::ClearRequested).unwrap();
        assert_eq!(state.search_term, "");
        assert_eq!(state.hint_text, "");
        assert!(state.results.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn reply_after_clear_is_discarded() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        let seq = dispatched_seq(&actions);
        handle_event(&mut state, &Event::ClearRequested).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::SearchResolved {
                seq,
                outcome: SearchOutcome::Success(vec![g1()]),
            },
        )
        .unwrap();

        assert!(!render);
        assert!(state.results.is_empty());
        assert_eq!(state.hint_text, "");
    }

    #[test]
    fn stale_reply_does_not_resolve_the_newer_search() {
        let mut state = state();
        let (_, first) = handle_event(&mut state, &enter("cats")).unwrap();
        let first = dispatched_seq(&first);
        handle_event(&mut state, &Event::ClearRequested).unwrap();
        let (_, second) = handle_event(&mut state, &enter("dogs")).unwrap();
        let second = dispatched_seq(&second);

        handle_event(
            &mut state,
            &Event::SearchResolved {
                seq: first,
                outcome: SearchOutcome::Success(vec![g1()]),
            },
        )
        .unwrap();
        assert!(state.loading);
        assert!(state.results.is_empty());

        handle_event(
            &mut state,
            &Event::SearchResolved {
                seq: second,
                outcome: SearchOutcome::Success(vec![g1()]),
            },
        )
        .unwrap();
        assert!(!state.loading);
        assert_eq!(state.hint_text, "Hit enter to see more dogs");
    }

    #[test]
    fn clear_is_ignored_when_disabled() {
        let mut state = state_with(AppOptions {
            results_mode: ResultsMode::Accumulate,
            clear_enabled: false,
        });
        state.results = vec![g1()];
        assert_eq!(handle_event(&mut state, &Event::ClearRequested).unwrap(), (false, vec![]));
        assert_eq!(state.results, vec![g1()]);
    }

    #[test]
    fn reply_is_forwarded_to_the_worker() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        let seq = dispatched_seq(&actions);

        let event = Event::ReplyReceived {
            tag: RequestTag { seq, term: "cats".to_string() },
            status: 200,
            body: br#"{"data":[]}"#.to_vec(),
        };
        let (render, actions) = handle_event(&mut state, &event).unwrap();

        assert!(!render);
        let [Action::PostToWorker(WorkerMessage::ResolveSearch { seq: posted, term, status, body, error_hints, .. })] =
            actions.as_slice()
        else {
            panic!("expected a single worker message, got {actions:?}");
        };
        assert_eq!(*posted, seq);
        assert_eq!(term, "cats");
        assert_eq!(*status, 200);
        assert_eq!(body, r#"{"data":[]}"#);
        assert_eq!(*error_hints, ErrorHints::Detailed);
        assert!(state.loading);
    }

    #[test]
    fn reply_for_abandoned_search_is_not_forwarded() {
        let mut state = state();
        let event = Event::ReplyReceived {
            tag: RequestTag { seq: 99, term: "cats".to_string() },
            status: 200,
            body: Vec::new(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
    }

    #[test]
    fn non_utf8_reply_fails_the_search() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        let seq = dispatched_seq(&actions);

        let event = Event::ReplyReceived {
            tag: RequestTag { seq, term: "cats".to_string() },
            status: 200,
            body: vec![0xff, 0xfe],
        };
        let (render, actions) = handle_event(&mut state, &event).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert!(state.hint_text.contains("not UTF-8"), "{}", state.hint_text);
    }

    #[test]
    fn worker_completion_resolves_the_search() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        let seq = dispatched_seq(&actions);

        let response = WorkerResponse::SearchCompleted {
            seq,
            outcome: SearchOutcome::Success(vec![g1()]),
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(render);
        assert_eq!(state.results, vec![g1()]);
    }

    #[test]
    fn worker_error_fails_the_outstanding_search() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        let seq = dispatched_seq(&actions);

        let response = WorkerResponse::Error {
            seq: Some(seq),
            message: "bad payload".to_string(),
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!state.loading);
        assert_eq!(state.hint_text, "bad payload");
    }

    #[test]
    fn missing_api_key_reports_a_hint_instead_of_searching() {
        let mut state = AppState::new(SearchClient::default(), AppOptions::default(), Theme::default());
        let (render, actions) = handle_event(&mut state, &enter("cats")).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.hint_text.contains("api_key"));
    }

    #[test]
    fn denied_web_access_refuses_to_search() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsResult { web_access: false }).unwrap();

        let (render, actions) = handle_event(&mut state, &enter("cats")).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.hint_text, NO_WEB_ACCESS_HINT);
    }

    #[test]
    fn ticks_animate_only_while_loading() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::Tick).unwrap(), (false, vec![]));

        handle_event(&mut state, &enter("cats")).unwrap();
        let (render, actions) = handle_event(&mut state, &Event::Tick).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleTick]);
        assert_eq!(state.spinner_tick, 1);
    }

    #[test]
    fn type_search_and_see_a_clip() {
        let mut state = state();

        handle_event(&mut state, &Event::TextChanged("ca".to_string())).unwrap();
        assert_eq!(state.hint_text, BLANK_HINT);

        handle_event(&mut state, &Event::TextChanged("cat".to_string())).unwrap();
        assert_eq!(state.hint_text, "Hit enter to search cat");

        let (_, actions) = handle_event(&mut state, &enter("cat")).unwrap();
        assert!(state.loading);

        handle_event(
            &mut state,
            &Event::SearchResolved {
                seq: dispatched_seq(&actions),
                outcome: SearchOutcome::Success(vec![g1()]),
            },
        )
        .unwrap();

        assert!(!state.loading);
        assert_eq!(state.results, vec![g1()]);
        assert_eq!(state.hint_text, "Hit enter to see more cat");
    }

    #[test]
    fn enter_on_a_two_character_term_does_nothing() {
        let mut state = state();
        handle_event(&mut state, &Event::TextChanged("zz".to_string())).unwrap();

        let (render, actions) = handle_event(&mut state, &enter("zz")).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.loading);
    }
}
