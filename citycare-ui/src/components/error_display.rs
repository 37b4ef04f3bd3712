use leptos::prelude::*;

#[component]
pub fn ErrorDisplay(
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error">
            <p class="error__title">"Something went wrong"</p>
            <p class="error__message">{message}</p>
            {move || on_retry.map(|retry| view! {
                <button
                    class="error__retry"
                    on:click=move |_| retry.run(())
                >
                    "Retry"
                </button>
            })}
        </div>
    }
}

/// Renders the store's error, if any, with an optional retry.
#[component]
pub fn StoreError(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|message| match on_retry {
            Some(retry) => view! { <ErrorDisplay message=message on_retry=retry/> }.into_any(),
            None => view! { <ErrorDisplay message=message/> }.into_any(),
        })
    }
}
