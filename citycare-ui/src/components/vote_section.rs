use crate::server::{apply_vote_command, fetch_vote_snapshot};
use crate::state::{dispatch, use_stores};
use citycare_app::application::{validation, VoteCommand, VotePanel};
use citycare_app::domain::{IssueId, Role};
use citycare_errors::AppError;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Counts, comments and (for citizens) vote controls for one issue.
#[component]
pub fn VoteSection(issue_id: IssueId) -> impl IntoView {
    let stores = use_stores();
    let can_vote = Memo::new(move |_| stores.auth.with(|auth| auth.has_role(Role::Citizen)));
    let panel = RwSignal::new(VotePanel::new(issue_id, can_vote.get_untracked()));
    let invalid = RwSignal::new(None::<String>);

    // Refetch when the role resolves so a citizen's own vote shows up.
    Effect::new(move |_| {
        let citizen = can_vote.get();
        panel.update(|p| {
            p.set_signed_in(citizen);
            p.begin_refresh();
        });
        dispatch(panel, fetch_vote_snapshot(issue_id), VotePanel::apply_snapshot);
    });

    let send = move |command: Option<VoteCommand>| {
        let Some(command) = command else { return };
        if let VoteCommand::Submit { comment: Some(comment), .. } = &command {
            if let Err(e) = validation::validate_comment(comment) {
                invalid.set(Some(e.to_string()));
                return;
            }
        }
        invalid.set(None);
        panel.update(VotePanel::begin_submit);
        spawn_local(async move {
            let outcome = apply_vote_command(command)
                .await
                .map_err(AppError::from_server_error);
            if panel.try_update(|p| p.finish_submit(outcome)).unwrap_or(false) {
                dispatch(panel, fetch_vote_snapshot(issue_id), VotePanel::apply_snapshot);
            }
        });
    };

    let counts = move || panel.with(|p| p.counts());
    let busy = Signal::derive(move || panel.with(|p| p.loading() || p.submitting()));
    let my_upvote = move || panel.with(|p| p.my_vote().upvote());

    view! {
        <section class="votes">
            <div class="votes__counts">
                <button
                    class="votes__button votes__button--up"
                    class:active=move || my_upvote() == Some(true)
                    prop:disabled=move || !can_vote.get() || busy.get()
                    on:click=move |_| send(panel.with_untracked(|p| p.plan_vote(true)))
                >
                    {move || format!("👍 {}", counts().upvotes)}
                </button>
                <button
                    class="votes__button votes__button--down"
                    class:active=move || my_upvote() == Some(false)
                    prop:disabled=move || !can_vote.get() || busy.get()
                    on:click=move |_| send(panel.with_untracked(|p| p.plan_vote(false)))
                >
                    {move || format!("👎 {}", counts().downvotes)}
                </button>
            </div>

            {move || can_vote.get().then(|| view! {
                <div class="votes__comment">
                    <textarea
                        class="field__input field__input--area"
                        placeholder="Add a comment"
                        prop:value=move || panel.with(|p| p.comment_input().to_string())
                        on:input=move |ev| panel.update(|p| p.set_comment_input(event_target_value(&ev)))
                    ></textarea>
                    <button
                        class="button"
                        prop:disabled=move || busy.get()
                        on:click=move |_| send(panel.with_untracked(VotePanel::plan_comment_update))
                    >
                        {move || panel.with(|p| p.comment_action_label())}
                    </button>
                    {move || panel.with(|p| p.my_vote().is_cast()).then(|| view! {
                        <button
                            class="button button--danger"
                            prop:disabled=move || busy.get()
                            on:click=move |_| panel.update(VotePanel::request_delete)
                        >
                            "Remove my vote"
                        </button>
                    })}
                </div>
            })}

            {move || panel.with(|p| p.confirming_delete()).then(|| view! {
                <div class="confirm">
                    <p>"Remove your vote and comment on this issue?"</p>
                    <button
                        class="button button--danger"
                        on:click=move |_| send(panel.with_untracked(VotePanel::plan_delete))
                    >
                        "Remove"
                    </button>
                    <button class="button" on:click=move |_| panel.update(VotePanel::cancel_delete)>
                        "Cancel"
                    </button>
                </div>
            })}

            {move || panel.with(VotePanel::my_vote_unavailable).then(|| view! {
                <p class="votes__error">"Could not load your vote status."</p>
            })}
            {move || invalid.get().map(|message| view! { <p class="field-error">{message}</p> })}
            {move || panel.with(|p| p.error().map(AppError::user_message)).map(|message| view! {
                <p class="votes__error">{message}</p>
            })}

            <ul class="votes__comments">
                {move || panel.with(|p| {
                    p.comments()
                        .map(|vote| {
                            let author = vote.author_name().to_string();
                            let text = vote.comment_text().unwrap_or_default().to_string();
                            let marker = if vote.upvote { "👍" } else { "👎" };
                            view! {
                                <li class="votes__comment-item">
                                    <strong>{author}</strong> " " {marker} ": " {text}
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                })}
            </ul>
        </section>
    }
}
