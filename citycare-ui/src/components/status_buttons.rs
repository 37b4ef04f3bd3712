use citycare_app::application::{StatusChange, StatusWorkflow};
use citycare_app::domain::Issue;
use leptos::prelude::*;

/// One button per status, always offered, plus the confirmation prompt.
#[component]
pub fn StatusButtons(
    issue: Issue,
    workflow: RwSignal<StatusWorkflow>,
    #[prop(into)] on_confirm: Callback<StatusChange>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let issue_id = issue.id;
    let current = issue.status;

    let buttons = StatusWorkflow::transitions_from(current)
        .into_iter()
        .map(|to| {
            let issue = issue.clone();
            view! {
                <button
                    class="status-buttons__button"
                    class:active=to == current
                    prop:disabled=move || busy.get()
                    on:click=move |_| workflow.update(|w| w.request(&issue, to))
                >
                    {to.label()}
                </button>
            }
        })
        .collect::<Vec<_>>();

    let confirm = move |_: leptos::ev::MouseEvent| {
        if let Some(change) = workflow.try_update(StatusWorkflow::confirm).flatten() {
            on_confirm.run(change);
        }
    };

    view! {
        <div class="status-buttons">
            {buttons}
            {move || {
                workflow
                    .with(|w| w.pending().filter(|change| change.issue_id == issue_id).map(StatusChange::prompt))
                    .map(|prompt| view! {
                        <div class="confirm">
                            <p>{prompt}</p>
                            <button class="button" on:click=confirm>"Confirm"</button>
                            <button class="button" on:click=move |_| workflow.update(StatusWorkflow::cancel)>
                                "Cancel"
                            </button>
                        </div>
                    })
            }}
        </div>
    }
}
