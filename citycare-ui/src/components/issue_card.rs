use citycare_app::domain::{Address, Issue};
use leptos::prelude::*;

#[component]
pub fn IssueCard(issue: Issue, #[prop(optional)] children: Option<Children>) -> impl IntoView {
    let tally = issue.tally();
    let status_class = format!("status status--{}", issue.status.as_str().to_lowercase());
    let address = issue
        .address
        .as_ref()
        .map(Address::summary)
        .filter(|summary| !summary.is_empty());
    let reported = issue
        .reported_at
        .map(|at| at.format("%d %b %Y, %H:%M").to_string());
    let resolved = issue
        .resolved_at
        .map(|at| at.format("%d %b %Y, %H:%M").to_string());
    let photos: Vec<String> = issue.attachment_urls().map(str::to_string).collect();
    let technicians: Vec<String> = issue
        .assigned_technicians
        .iter()
        .map(|technician| technician.name.clone())
        .collect();

    view! {
        <article class="issue-card">
            <header class="issue-card__header">
                <h3 class="issue-card__title">{issue.title.clone()}</h3>
                <span class=status_class>{issue.status.label()}</span>
            </header>
            <p class="issue-card__category">{issue.category_label()}</p>
            <p class="issue-card__description">{issue.description.clone()}</p>
            {address.map(|address| view! { <p class="issue-card__address">{address}</p> })}
            {(!photos.is_empty()).then(|| view! {
                <div class="issue-card__photos">
                    {photos
                        .into_iter()
                        .map(|src| view! { <img src=src alt="Issue photo" class="issue-card__photo"/> })
                        .collect::<Vec<_>>()}
                </div>
            })}
            {(!technicians.is_empty()).then(|| view! {
                <p class="issue-card__technicians">"Assigned: " {technicians.join(", ")}</p>
            })}
            <footer class="issue-card__footer">
                <span class="issue-card__votes">
                    {format!("👍 {}  👎 {}", tally.upvotes, tally.downvotes)}
                </span>
                {reported.map(|at| view! { <span class="issue-card__date">"Reported " {at}</span> })}
                {resolved.map(|at| view! { <span class="issue-card__date">"Resolved " {at}</span> })}
            </footer>
            {children.map(|children| view! { <div class="issue-card__actions">{children()}</div> })}
        </article>
    }
}
