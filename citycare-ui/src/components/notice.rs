use leptos::prelude::*;

/// Success banner; renders nothing while `message` is `None`.
#[component]
pub fn Notice(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|message| view! { <p class="notice">{message}</p> })
    }
}

/// Inline validation message, kept apart from server errors.
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|message| view! { <p class="field-error">{message}</p> })
    }
}
