use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::AbortController;

use crate::api;
use crate::config::ClientConfig;
use crate::models::{ChatRequest, Message};
use crate::session::ChatSession;

/// Shared chat state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: ReadSignal<ChatSession>,
    pub set_session: WriteSignal<ChatSession>,
    /// Derived views; they only notify when their value actually changes.
    pub visible: Memo<Vec<(usize, Message)>>,
    pub is_waiting: Memo<bool>,
    pub is_initial: Memo<bool>,
    pub config: StoredValue<ClientConfig>,
    abort: StoredValue<Option<AbortController>, LocalStorage>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    ///
    /// When the owning view is torn down, an outstanding request is aborted
    /// and its ticket cancelled, so a late response never touches the state.
    pub fn provide(config: ClientConfig) -> Self {
        let (session, set_session) = signal(ChatSession::new());
        let state = Self {
            session,
            set_session,
            visible: Memo::new(move |_| session.with(ChatSession::visible_entries)),
            is_waiting: Memo::new(move |_| session.with(ChatSession::is_waiting)),
            is_initial: Memo::new(move |_| session.with(ChatSession::is_initial_screen)),
            config: StoredValue::new(config),
            abort: StoredValue::new_local(None),
        };

        on_cleanup(move || {
            if let Some(controller) = state.abort.try_update_value(Option::take).flatten() {
                controller.abort();
            }
            state.set_session.try_update(ChatSession::cancel);
        });

        provide_context(state);
        state
    }

    /// Submit `input`. Returns `false`, leaving the session untouched, while
    /// a reply is pending or when the input is blank.
    pub fn send(&self, input: &str) -> bool {
        let include_history = self.config.with_value(|c| c.send_history);
        let mut pending = None;
        self.set_session.maybe_update(|s| {
            pending = s.submit(input, include_history);
            pending.is_some()
        });
        let Some(pending) = pending else {
            return false;
        };

        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(AbortController::signal);
        self.abort.set_value(controller);

        let state = *self;
        let config = self.config.get_value();
        spawn_local(async move {
            let request = ChatRequest { message: pending.text, history: pending.history };
            let outcome = api::send_chat(&config, &request, signal.as_ref()).await;
            let failed = outcome.is_err();

            let applied = state
                .set_session
                .try_update(|s| s.resolve(pending.ticket, outcome))
                .unwrap_or(false);
            if !applied {
                log::debug!("Discarded reply for a cancelled request");
            } else if failed {
                log::error!("Chat request failed");
            }
        });
        true
    }
}
