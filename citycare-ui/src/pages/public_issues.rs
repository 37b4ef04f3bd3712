use crate::components::{IssueCard, LoadingSpinner, StoreError, VoteSection};
use crate::server::fetch_public_issues;
use crate::state::{dispatch, error_message, use_stores};
use citycare_app::application::{PublicIssueList, SortOrder};
use leptos::prelude::*;

#[component]
pub fn PublicIssuesPage() -> impl IntoView {
    let stores = use_stores();
    let public = stores.public;

    let load = move || {
        public.update(PublicIssueList::begin);
        dispatch(public, fetch_public_issues(), PublicIssueList::settle_fetch);
    };
    Effect::new(move |_| load());

    let loading = move || public.with(|list| list.loading() && !list.loaded());
    let empty = move || public.with(|list| list.loaded() && list.is_empty());

    view! {
        <div class="page">
            <header class="page-header">
                <h1 class="page-title">"Public Issues"</h1>
                <select
                    class="field__input sort-select"
                    on:change=move |ev| {
                        let order = event_target_value(&ev).parse().unwrap_or_default();
                        public.update(|list| list.set_order(order));
                    }
                >
                    {SortOrder::ALL
                        .into_iter()
                        .map(|order| view! {
                            <option value=order.as_str() selected=move || public.with(|l| l.order()) == order>
                                {order.label()}
                            </option>
                        })
                        .collect::<Vec<_>>()}
                </select>
            </header>

            <StoreError
                message=error_message(public, PublicIssueList::error)
                on_retry=Callback::new(move |_| load())
            />
            <Show when=loading>
                <LoadingSpinner text="Loading issues..."/>
            </Show>
            <Show when=empty>
                <p class="page-empty">"No issues have been reported yet."</p>
            </Show>

            <div class="issue-list">
                <For
                    each=move || public.with(PublicIssueList::view)
                    key=|ranked| ranked.issue.id
                    children=move |ranked| {
                        let issue_id = ranked.issue.id;
                        view! {
                            <IssueCard issue=ranked.issue>
                                <VoteSection issue_id=issue_id/>
                            </IssueCard>
                        }
                    }
                />
            </div>
        </div>
    }
}
