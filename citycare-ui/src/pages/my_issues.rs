use crate::components::{IssueCard, LoadingSpinner, Notice, RequireRole, StoreError};
use crate::server::{delete_issue, fetch_issues};
use crate::state::{dispatch, error_message, use_stores};
use citycare_app::application::{IssueCollection, IssueStore};
use citycare_app::domain::{IssueId, Role};
use leptos::prelude::*;

#[component]
pub fn MyIssuesPage() -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Citizen]>
            <MyIssuesList/>
        </RequireRole>
    }
}

#[component]
fn MyIssuesList() -> impl IntoView {
    let issues = use_stores().issues;
    let confirming = RwSignal::new(None::<IssueId>);

    let load = move || {
        issues.update(IssueStore::begin);
        dispatch(issues, fetch_issues(IssueCollection::Mine), |store, outcome| {
            store.settle_fetch(IssueCollection::Mine, outcome)
        });
    };
    Effect::new(move |_| {
        if issues.with_untracked(|s| s.needs_fetch(IssueCollection::Mine)) {
            load();
        }
    });

    let remove = move |issue_id: IssueId| {
        confirming.set(None);
        issues.update(IssueStore::begin);
        dispatch(issues, delete_issue(issue_id), move |store, outcome| {
            store.settle_delete(issue_id, outcome)
        });
    };

    let busy = Signal::derive(move || issues.with(IssueStore::loading));
    let success = Signal::derive(move || issues.with(|s| s.success_message().map(str::to_string)));

    view! {
        <div class="page">
            <h1 class="page-title">"My Issues"</h1>
            <Notice message=success/>
            <StoreError
                message=error_message(issues, IssueStore::error)
                on_retry=Callback::new(move |_| load())
            />
            {move || {
                let mine = issues.with(|s| s.my_issues().to_vec());
                if mine.is_empty() {
                    return if busy.get() {
                        view! { <LoadingSpinner/> }.into_any()
                    } else {
                        view! {
                            <p class="page-empty">
                                "You have not reported any issues. " <a href="/report-issue">"Report one"</a>
                            </p>
                        }
                        .into_any()
                    };
                }
                view! {
                    <div class="issue-list">
                        {mine
                            .into_iter()
                            .map(|issue| {
                                let issue_id = issue.id;
                                view! {
                                    <IssueCard issue=issue>
                                        {move || if confirming.get() == Some(issue_id) {
                                            view! {
                                                <div class="confirm">
                                                    <p>"Delete this issue? This cannot be undone."</p>
                                                    <button
                                                        class="button button--danger"
                                                        prop:disabled=move || busy.get()
                                                        on:click=move |_| remove(issue_id)
                                                    >
                                                        "Delete"
                                                    </button>
                                                    <button class="button" on:click=move |_| confirming.set(None)>
                                                        "Cancel"
                                                    </button>
                                                </div>
                                            }
                                            .into_any()
                                        } else {
                                            view! {
                                                <button
                                                    class="button button--danger"
                                                    on:click=move |_| confirming.set(Some(issue_id))
                                                >
                                                    "Delete"
                                                </button>
                                            }
                                            .into_any()
                                        }}
                                    </IssueCard>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
