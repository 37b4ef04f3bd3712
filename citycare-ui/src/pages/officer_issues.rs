use crate::components::{FieldError, IssueCard, LoadingSpinner, Notice, RequireRole, StoreError};
use crate::server::{assign_technicians, fetch_issues, list_technicians};
use crate::state::{dispatch, error_message, use_stores, Stores};
use citycare_app::application::validation::validate_assignment;
use citycare_app::application::{IssueCollection, IssueStore, RosterStore};
use citycare_app::domain::{suited_first, Issue, Role};
use leptos::prelude::*;

#[component]
pub fn OfficerIssuesPage() -> impl IntoView {
    view! {
        <RequireRole roles=&[Role::Officer]>
            <AllIssues/>
        </RequireRole>
    }
}

#[component]
fn AllIssues() -> impl IntoView {
    let stores = use_stores();
    let issues = stores.issues;

    let load = move || {
        issues.update(IssueStore::begin);
        dispatch(issues, fetch_issues(IssueCollection::All), |store, outcome| {
            store.settle_fetch(IssueCollection::All, outcome)
        });
    };
    Effect::new(move |_| {
        if issues.with_untracked(|s| s.needs_fetch(IssueCollection::All)) {
            load();
        }
        if stores.technicians.with_untracked(RosterStore::needs_fetch) {
            stores.technicians.update(RosterStore::begin);
            dispatch(stores.technicians, list_technicians(), RosterStore::settle_fetch);
        }
    });

    let busy = Signal::derive(move || issues.with(IssueStore::loading));
    let success = Signal::derive(move || issues.with(|s| s.success_message().map(str::to_string)));

    view! {
        <div class="page">
            <h1 class="page-title">"All Issues"</h1>
            <Notice message=success/>
            <StoreError
                message=error_message(issues, IssueStore::error)
                on_retry=Callback::new(move |_| load())
            />
            <StoreError message=error_message(stores.technicians, RosterStore::error)/>
            {move || {
                let all = issues.with(|s| s.issues().to_vec());
                if all.is_empty() {
                    return if busy.get() {
                        view! { <LoadingSpinner/> }.into_any()
                    } else {
                        view! { <p class="page-empty">"No issues have been reported."</p> }.into_any()
                    };
                }
                view! {
                    <div class="issue-list">
                        {all
                            .into_iter()
                            .map(|issue| {
                                let card = issue.clone();
                                view! {
                                    <IssueCard issue=card>
                                        <AssignPanel issue=issue stores=stores busy=busy/>
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

/// Technician picker for one issue. Technicians with a matching skill are
/// listed first.
#[component]
fn AssignPanel(issue: Issue, stores: Stores, #[prop(into)] busy: Signal<bool>) -> impl IntoView {
    let issue_id = issue.id;
    let category = issue.issue_type.clone();
    let selected = RwSignal::new(
        issue
            .assigned_technicians
            .iter()
            .map(|technician| technician.id)
            .collect::<Vec<i64>>(),
    );
    let invalid = RwSignal::new(None::<String>);

    let toggle = move |technician_id: i64, checked: bool| {
        selected.update(|ids| {
            ids.retain(|id| *id != technician_id);
            if checked {
                ids.push(technician_id);
            }
        });
    };

    let assign = move |_: leptos::ev::MouseEvent| match validate_assignment(&selected.get_untracked()) {
        Ok(ids) => {
            invalid.set(None);
            stores.issues.update(IssueStore::begin);
            dispatch(
                stores.issues,
                assign_technicians(issue_id, ids),
                IssueStore::settle_assign,
            );
        }
        Err(e) => invalid.set(Some(e.to_string())),
    };

    view! {
        <div class="assign">
            <p class="assign__title">"Assign technicians"</p>
            <ul class="assign__list">
                {move || {
                    stores.technicians.with(|roster| {
                        suited_first(roster.entries(), category.as_ref())
                            .into_iter()
                            .map(|technician| {
                                let technician_id = technician.id;
                                let suited = category
                                    .as_ref()
                                    .is_some_and(|c| technician.has_skill(c));
                                let skills = technician
                                    .skills
                                    .iter()
                                    .map(|skill| skill.label())
                                    .collect::<Vec<_>>()
                                    .join(", ");
                                view! {
                                    <li class="assign__item" class:suited=suited>
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || selected.with(|ids| ids.contains(&technician_id))
                                                on:change=move |ev| toggle(technician_id, event_target_checked(&ev))
                                            />
                                            {technician.name} " "
                                            <span class="assign__skills">{skills}</span>
                                        </label>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    })
                }}
            </ul>
            <FieldError message=invalid/>
            <button class="button" prop:disabled=move || busy.get() on:click=assign>
                "Assign"
            </button>
        </div>
    }
}
