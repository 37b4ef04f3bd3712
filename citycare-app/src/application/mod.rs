mod auth_state;
mod issue_store;
mod profile_store;
mod public_issues;
mod roster_store;
mod status_workflow;
pub mod validation;
mod vote_panel;

pub use auth_state::AuthState;
pub use issue_store::{IssueCollection, IssueStore};
pub use profile_store::ProfileStore;
pub use public_issues::{ordered, rank, PublicIssueList, RankedIssue, SortOrder};
pub use roster_store::RosterStore;
pub use status_workflow::{StatusChange, StatusWorkflow};
pub use vote_panel::{VoteCommand, VotePanel, VoteSnapshot};

/// Whether a locally held collection still reflects the backend.
///
/// Collections start `Stale`, become `Fresh` when fetched, and go back to
/// `Stale` when a mutation elsewhere may have changed them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Freshness {
    #[default]
    Stale,
    Fresh,
}
