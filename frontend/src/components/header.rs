use leptos::prelude::*;

use crate::state::AppState;

const APP_NAME: &str = "EmeraldAI";

/// Compact header pinned to the top once the conversation has started.
#[component]
pub fn ChatHeaderFixed() -> impl IntoView {
    let state = expect_context::<AppState>();
    let logo = state.config.with_value(|c| c.logo_url());

    view! {
        <div class="chat-header-fixed">
            <img src=logo alt="EmeraldAI Logo" class="header-logo-small" />
            <h1 class="title-small">{APP_NAME}</h1>
        </div>
    }
}

/// Centered logo and title shown while only the greeting exists.
#[component]
pub fn InitialScreen() -> impl IntoView {
    let state = expect_context::<AppState>();
    let logo = state.config.with_value(|c| c.logo_url());

    view! {
        <div class="initial-screen">
            <div class="centered-header">
                <img src=logo alt="EmeraldAI Logo" class="header-logo-large" />
                <h1 class="main-title">{APP_NAME}</h1>
            </div>
        </div>
    }
}
