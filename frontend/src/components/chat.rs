use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;

use crate::components::header::InitialScreen;
use crate::models::Message;
use crate::state::AppState;

/// Content area: the empty-state screen or the message list, plus the input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="content-area">
            <Show when=move || state.is_initial.get() fallback=|| view! { <MessageList /> }>
                <InitialScreen />
            </Show>
        </div>
        <ChatInput />
    }
}

/// Scrollable message list. Follows the newest entry whenever the list or
/// the waiting indicator changes.
#[component]
fn MessageList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let container = NodeRef::<Div>::new();

    Effect::new(move |_| {
        state.visible.track();
        state.is_waiting.track();
        if let Some(el) = container.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div class="chat-area">
            <div class="chat-messages" node_ref=container>
                <For
                    each=move || state.visible.get()
                    key=|(position, _)| *position
                    let:entry
                >
                    <MessageBubble msg=entry.1 />
                </For>
                <Show when=move || state.is_waiting.get()>
                    <ChatLoader />
                </Show>
            </div>
        </div>
    }
}

#[component]
fn MessageBubble(msg: Message) -> impl IntoView {
    let css_class = format!("message {}", msg.sender.as_str());

    view! {
        <div class=css_class>
            <strong>{msg.sender.label()}</strong>
            {msg.text}
        </div>
    }
}

/// Spinning logo shown while a reply is pending.
#[component]
fn ChatLoader() -> impl IntoView {
    let state = expect_context::<AppState>();
    let logo = state.config.with_value(|c| c.logo_url());

    view! {
        <div class="message bot message-loader">
            <div class="loader-container">
                <div class="spinner-border"></div>
                <img src=logo alt="EmeraldAI Logo" class="loader-logo" />
            </div>
            <p class="typing-indicator">"IA: Escribiendo..."</p>
        </div>
    }
}

/// Text input and send button, both disabled while waiting.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());
    let is_waiting = move || state.is_waiting.get();

    let send = move || {
        if state.send(&input.get_untracked()) {
            set_input.set(String::new());
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-container">
            <div class="input-wrapper">
                <input
                    type="text"
                    placeholder="Pregunta a EmeraldAI"
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                    disabled=is_waiting
                />
                <button class="send-button" on:click=move |_| send() disabled=is_waiting>
                    {move || if is_waiting() { "..." } else { "▲" }}
                </button>
            </div>
        </div>
    }
}
