use crate::state::use_stores;
use citycare_app::application::AuthState;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let stores = use_stores();
    let role = Memo::new(move |_| stores.auth.with(AuthState::role));

    view! {
        <div class="hero">
            <h1 class="hero__title">"CityCare"</h1>
            <p class="hero__subtitle">
                "Report potholes, broken streetlights and other civic problems, and follow them until they are fixed."
            </p>
            <div class="hero__actions">
                <a href="/issues" class="button">"Browse public issues"</a>
                {move || match role.get() {
                    Some(role) => view! {
                        <a href=role.home_path() class="button button--primary">"Go to my dashboard"</a>
                    }
                    .into_any(),
                    None => view! {
                        <a href="/login" class="button button--primary">"Log in"</a>
                        <a href="/signup" class="button">"Create an account"</a>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
