use crate::domain::{IssueId, MyVote, Vote, VoteCounts};
use citycare_errors::AppError;
use serde::{Deserialize, Serialize};

/// Everything the panel shows, fetched together after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteSnapshot {
    pub counts: VoteCounts,
    pub my_vote: MyVote,
    pub comments: Vec<Vote>,
    /// Set when counts and comments loaded but the caller's own vote did not.
    #[serde(default)]
    pub my_vote_unavailable: bool,
}

/// A mutation the panel wants sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteCommand {
    Submit {
        issue_id: IssueId,
        upvote: bool,
        comment: Option<String>,
    },
    Delete {
        issue_id: IssueId,
    },
}

/// Vote and comment state for one issue.
///
/// The panel never patches itself optimistically: after a command succeeds
/// the caller refetches a [`VoteSnapshot`] and hands it to
/// [`VotePanel::apply_snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct VotePanel {
    issue_id: IssueId,
    signed_in: bool,
    snapshot: VoteSnapshot,
    comment_input: String,
    loading: bool,
    submitting: bool,
    confirming_delete: bool,
    error: Option<AppError>,
}

impl VotePanel {
    pub fn new(issue_id: IssueId, signed_in: bool) -> Self {
        Self {
            issue_id,
            signed_in,
            snapshot: VoteSnapshot::default(),
            comment_input: String::new(),
            loading: true,
            submitting: false,
            confirming_delete: false,
            error: None,
        }
    }

    pub fn issue_id(&self) -> IssueId {
        self.issue_id
    }

    pub fn signed_in(&self) -> bool {
        self.signed_in
    }

    /// The session can resolve after the panel was built; voting follows it.
    pub fn set_signed_in(&mut self, signed_in: bool) {
        self.signed_in = signed_in;
        if !signed_in {
            self.confirming_delete = false;
        }
    }

    pub fn counts(&self) -> VoteCounts {
        self.snapshot.counts
    }

    pub fn my_vote(&self) -> &MyVote {
        &self.snapshot.my_vote
    }

    /// Votes that actually carry a comment, in backend order.
    pub fn comments(&self) -> impl Iterator<Item = &Vote> {
        self.snapshot
            .comments
            .iter()
            .filter(|vote| vote.comment_text().is_some())
    }

    pub fn my_vote_unavailable(&self) -> bool {
        self.snapshot.my_vote_unavailable
    }

    pub fn comment_input(&self) -> &str {
        &self.comment_input
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    /// Label for the comment button: "Update" once a comment exists.
    pub fn comment_action_label(&self) -> &'static str {
        if self.snapshot.my_vote.comment().trim().is_empty() {
            "Submit"
        } else {
            "Update"
        }
    }

    pub fn set_comment_input(&mut self, text: impl Into<String>) {
        self.comment_input = text.into();
    }

    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_snapshot(&mut self, outcome: Result<VoteSnapshot, AppError>) {
        self.loading = false;
        match outcome {
            Ok(snapshot) => {
                self.comment_input = snapshot.my_vote.comment().to_string();
                self.snapshot = snapshot;
            }
            Err(err) => self.error = Some(err),
        }
    }

    /// Plans an up/down vote carrying the current comment input.
    ///
    /// Returns `None` when nothing would change: same flag as the known vote
    /// and the same comment text.
    pub fn plan_vote(&self, upvote: bool) -> Option<VoteCommand> {
        if !self.signed_in || self.submitting {
            return None;
        }

        let comment = self.comment_input.trim();
        let unchanged = self.snapshot.my_vote.upvote() == Some(upvote)
            && comment == self.snapshot.my_vote.comment().trim();
        if unchanged {
            return None;
        }

        Some(VoteCommand::Submit {
            issue_id: self.issue_id,
            upvote,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }

    /// Plans a comment update that keeps the known flag, or upvotes when the
    /// user has not voted yet.
    pub fn plan_comment_update(&self) -> Option<VoteCommand> {
        self.plan_vote(self.snapshot.my_vote.upvote().unwrap_or(true))
    }

    pub fn request_delete(&mut self) {
        if self.signed_in && self.snapshot.my_vote.is_cast() {
            self.confirming_delete = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Plans the removal of the user's vote. Needs an existing vote and a
    /// prior [`VotePanel::request_delete`].
    pub fn plan_delete(&self) -> Option<VoteCommand> {
        let allowed = self.signed_in
            && !self.submitting
            && self.confirming_delete
            && self.snapshot.my_vote.is_cast();
        allowed.then_some(VoteCommand::Delete {
            issue_id: self.issue_id,
        })
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
        self.confirming_delete = false;
        self.error = None;
    }

    /// Returns `true` when the caller should refetch the snapshot.
    pub fn finish_submit(&mut self, outcome: Result<(), AppError>) -> bool {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.loading = true;
                true
            }
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(upvote: bool, comment: &str) -> VoteSnapshot {
        VoteSnapshot {
            counts: VoteCounts {
                upvotes: 3,
                downvotes: 1,
            },
            my_vote: MyVote::Cast {
                upvote,
                comment: comment.to_string(),
            },
            comments: vec![],
            my_vote_unavailable: false,
        }
    }

    fn loaded(snapshot: VoteSnapshot) -> VotePanel {
        let mut panel = VotePanel::new(7, true);
        panel.apply_snapshot(Ok(snapshot));
        panel
    }

    #[test]
    fn test_no_vote_is_not_an_error() {
        let panel = loaded(VoteSnapshot::default());
        assert_eq!(panel.my_vote(), &MyVote::NoVote);
        assert!(panel.error().is_none());
        assert!(!panel.loading());
    }

    #[test]
    fn test_snapshot_seeds_comment_input() {
        let panel = loaded(cast(true, "please fix"));
        assert_eq!(panel.comment_input(), "please fix");
        assert_eq!(panel.comment_action_label(), "Update");
    }

    #[test]
    fn test_same_flag_and_comment_is_suppressed() {
        let panel = loaded(cast(true, "please fix"));
        assert_eq!(panel.plan_vote(true), None);
    }

    #[test]
    fn test_same_flag_with_new_comment_is_submitted() {
        let mut panel = loaded(cast(true, "please fix"));
        panel.set_comment_input("still broken");
        assert_eq!(
            panel.plan_vote(true),
            Some(VoteCommand::Submit {
                issue_id: 7,
                upvote: true,
                comment: Some("still broken".to_string()),
            })
        );
    }

    #[test]
    fn test_flipping_the_flag_is_submitted() {
        let panel = loaded(cast(true, ""));
        assert_eq!(
            panel.plan_vote(false),
            Some(VoteCommand::Submit {
                issue_id: 7,
                upvote: false,
                comment: None,
            })
        );
    }

    #[test]
    fn test_comment_update_preserves_known_flag() {
        let mut panel = loaded(cast(false, "old"));
        panel.set_comment_input("new");
        assert!(matches!(
            panel.plan_comment_update(),
            Some(VoteCommand::Submit { upvote: false, .. })
        ));

        let mut fresh = loaded(VoteSnapshot::default());
        fresh.set_comment_input("first!");
        assert!(matches!(
            fresh.plan_comment_update(),
            Some(VoteCommand::Submit { upvote: true, .. })
        ));
    }

    #[test]
    fn test_anonymous_visitor_cannot_vote() {
        let mut panel = VotePanel::new(7, false);
        panel.apply_snapshot(Ok(VoteSnapshot::default()));
        assert_eq!(panel.plan_vote(true), None);
    }

    #[test]
    fn test_role_arriving_late_enables_voting() {
        let mut panel = VotePanel::new(7, false);
        panel.apply_snapshot(Ok(VoteSnapshot::default()));
        assert_eq!(panel.plan_vote(true), None);

        panel.set_signed_in(true);
        assert!(panel.signed_in());
        assert!(matches!(panel.plan_vote(true), Some(VoteCommand::Submit { upvote: true, .. })));

        let mut voted = loaded(cast(true, ""));
        voted.request_delete();
        voted.set_signed_in(false);
        assert!(!voted.confirming_delete());
        assert_eq!(voted.plan_delete(), None);
    }

    #[test]
    fn test_unavailable_own_vote_keeps_counts() {
        let mut snapshot = cast(true, "");
        snapshot.my_vote = MyVote::NoVote;
        snapshot.my_vote_unavailable = true;
        let panel = loaded(snapshot);
        assert!(panel.my_vote_unavailable());
        assert!(panel.error().is_none());
        assert_eq!(panel.counts().upvotes, 3);
    }

    #[test]
    fn test_delete_requires_existing_vote_and_confirmation() {
        let mut empty = loaded(VoteSnapshot::default());
        empty.request_delete();
        assert_eq!(empty.plan_delete(), None);

        let mut panel = loaded(cast(true, ""));
        assert_eq!(panel.plan_delete(), None);
        panel.request_delete();
        assert_eq!(panel.plan_delete(), Some(VoteCommand::Delete { issue_id: 7 }));
        panel.cancel_delete();
        assert_eq!(panel.plan_delete(), None);
    }

    #[test]
    fn test_successful_submit_asks_for_refetch() {
        let mut panel = loaded(cast(true, ""));
        panel.begin_submit();
        assert!(panel.submitting());
        assert_eq!(panel.plan_vote(false), None);

        assert!(panel.finish_submit(Ok(())));
        assert!(!panel.submitting());
        assert!(panel.loading());
    }

    #[test]
    fn test_failed_submit_keeps_previous_state() {
        let mut panel = loaded(cast(true, "x"));
        panel.begin_submit();
        assert!(!panel.finish_submit(Err(AppError::backend(500, "boom"))));
        assert_eq!(panel.my_vote().upvote(), Some(true));
        assert!(panel.error().is_some());
    }

    #[test]
    fn test_comments_skip_blank_entries() {
        let snapshot: VoteSnapshot = VoteSnapshot {
            comments: serde_json::from_value(serde_json::json!([
                { "id": 1, "upvote": true, "comment": "agreed", "citizen": { "name": "Asha" } },
                { "id": 2, "upvote": false, "comment": "   " },
                { "id": 3, "upvote": false }
            ]))
            .unwrap(),
            ..Default::default()
        };
        let panel = loaded(snapshot);
        let authors: Vec<_> = panel.comments().map(Vote::author_name).collect();
        assert_eq!(authors, vec!["Asha"]);
    }
}
