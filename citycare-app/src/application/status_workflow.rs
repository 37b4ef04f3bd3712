use crate::domain::{Issue, IssueId, IssueStatus};
use serde::{Deserialize, Serialize};

/// A status change waiting for the technician's confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub issue_id: IssueId,
    pub title: String,
    pub from: IssueStatus,
    pub to: IssueStatus,
}

impl StatusChange {
    pub fn prompt(&self) -> String {
        format!("Change status of \"{}\" to {}?", self.title, self.to)
    }
}

/// Technician-driven status changes.
///
/// Any status may follow any other, `Resolved` included; the only gate is
/// the confirmation step between [`StatusWorkflow::request`] and
/// [`StatusWorkflow::confirm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusWorkflow {
    pending: Option<StatusChange>,
}

impl StatusWorkflow {
    /// Statuses offered for an issue currently in `_current`.
    pub fn transitions_from(_current: IssueStatus) -> [IssueStatus; 3] {
        IssueStatus::ALL
    }

    /// Starts a change, replacing any unconfirmed one.
    pub fn request(&mut self, issue: &Issue, to: IssueStatus) {
        self.pending = Some(StatusChange {
            issue_id: issue.id,
            title: issue.title.clone(),
            from: issue.status,
            to,
        });
    }

    pub fn pending(&self) -> Option<&StatusChange> {
        self.pending.as_ref()
    }

    pub fn is_pending_for(&self, issue_id: IssueId) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|change| change.issue_id == issue_id)
    }

    /// Hands out the confirmed change; the caller sends it.
    pub fn confirm(&mut self) -> Option<StatusChange> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(status: IssueStatus) -> Issue {
        let mut issue: Issue =
            serde_json::from_value(serde_json::json!({ "id": 11, "title": "Leaking main" })).unwrap();
        issue.status = status;
        issue
    }

    #[test]
    fn test_every_status_is_reachable_from_every_status() {
        for current in IssueStatus::ALL {
            assert_eq!(StatusWorkflow::transitions_from(current), IssueStatus::ALL);
        }
    }

    #[test]
    fn test_change_waits_for_confirmation() {
        let mut workflow = StatusWorkflow::default();
        workflow.request(&issue(IssueStatus::Pending), IssueStatus::InProgress);

        assert!(workflow.is_pending_for(11));
        assert_eq!(
            workflow.pending().map(StatusChange::prompt).as_deref(),
            Some("Change status of \"Leaking main\" to IN_PROGRESS?")
        );

        let change = workflow.confirm().unwrap();
        assert_eq!(change.from, IssueStatus::Pending);
        assert_eq!(change.to, IssueStatus::InProgress);
        assert!(workflow.pending().is_none());
    }

    #[test]
    fn test_cancel_sends_nothing() {
        let mut workflow = StatusWorkflow::default();
        workflow.request(&issue(IssueStatus::Pending), IssueStatus::Resolved);
        workflow.cancel();
        assert_eq!(workflow.confirm(), None);
    }

    #[test]
    fn test_current_status_is_offered_and_confirmable() {
        for current in IssueStatus::ALL {
            assert!(StatusWorkflow::transitions_from(current).contains(&current));

            let mut workflow = StatusWorkflow::default();
            workflow.request(&issue(current), current);
            let change = workflow.confirm().unwrap();
            assert_eq!(change.from, change.to);
        }
    }

    #[test]
    fn test_resolved_issue_can_be_reopened() {
        let mut workflow = StatusWorkflow::default();
        workflow.request(&issue(IssueStatus::Resolved), IssueStatus::Pending);
        let change = workflow.confirm().unwrap();
        assert_eq!(change.to, IssueStatus::Pending);
    }
}
