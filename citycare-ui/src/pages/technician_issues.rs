use crate::components::{IssueCard, LoadingSpinner, Notice, RequireRole, StatusButtons, StoreError};
use crate::server::{fetch_issues, update_issue_status};
use crate::state::{dispatch, error_message, use_stores};
use citycare_app::application::{IssueCollection, IssueStore, StatusChange, StatusWorkflow};
use citycare_app::domain::Role;
use leptos::prelude::*;

#[component]
pub fn TechnicianIssuesPage() -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Technician]>
            <AssignedIssues/>
        </RequireRole>
    }
}

#[component]
fn AssignedIssues() -> impl IntoView {
    let issues = use_stores().issues;
    let workflow = RwSignal::new(StatusWorkflow::default());

    let load = move || {
        issues.update(IssueStore::begin);
        dispatch(issues, fetch_issues(IssueCollection::Assigned), |store, outcome| {
            store.settle_fetch(IssueCollection::Assigned, outcome)
        });
    };
    Effect::new(move |_| {
        if issues.with_untracked(|s| s.needs_fetch(IssueCollection::Assigned)) {
            load();
        }
    });

    let apply = Callback::new(move |change: StatusChange| {
        issues.update(IssueStore::begin);
        dispatch(
            issues,
            update_issue_status(change.issue_id, change.to),
            IssueStore::settle_status,
        );
    });

    let busy = Signal::derive(move || issues.with(IssueStore::loading));
    let success = Signal::derive(move || issues.with(|s| s.success_message().map(str::to_string)));

    view! {
        <div class="page">
            <h1 class="page-title">"Assigned Issues"</h1>
            <Notice message=success/>
            <StoreError
                message=error_message(issues, IssueStore::error)
                on_retry=Callback::new(move |_| load())
            />
            {move || {
                let assigned = issues.with(|s| s.assigned_issues().to_vec());
                if assigned.is_empty() {
                    return if busy.get() {
                        view! { <LoadingSpinner/> }.into_any()
                    } else {
                        view! { <p class="page-empty">"No issues are assigned to you."</p> }.into_any()
                    };
                }
                view! {
                    <div class="issue-list">
                        {assigned
                            .into_iter()
                            .map(|issue| {
                                let card = issue.clone();
                                view! {
                                    <IssueCard issue=card>
                                        <StatusButtons issue=issue workflow=workflow on_confirm=apply busy=busy/>
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
