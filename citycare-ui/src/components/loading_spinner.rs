use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] text: Option<String>) -> impl IntoView {
    let text = text.unwrap_or_else(|| "Loading...".to_string());
    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            <p class="loading__text">{text}</p>
        </div>
    }
}
