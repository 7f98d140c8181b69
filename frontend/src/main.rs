mod api;
mod components;
mod config;
mod models;
mod session;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatArea;
use components::header::ChatHeaderFixed;
use config::ClientConfig;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide(ClientConfig::from_build_env());

    view! {
        <div class="app-container">
            <Show when=move || !state.is_initial.get()>
                <ChatHeaderFixed />
            </Show>
            <ChatArea />
        </div>
    }
}

fn main() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }
    mount_to_body(App);
}
