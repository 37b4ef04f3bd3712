use super::Freshness;
use crate::domain::{Issue, IssueId};
use citycare_errors::AppError;
use serde::{Deserialize, Serialize};

/// The three issue lists a signed-in user can be looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCollection {
    /// Issues reported by the signed-in citizen.
    Mine,
    /// Every issue, as seen by an officer.
    All,
    /// Issues assigned to the signed-in technician.
    Assigned,
}

/// Client-side mirror of the backend's issues.
///
/// Every operation is split in two: [`IssueStore::begin`] when the request is
/// dispatched and a `settle_*` call once it has resolved. Collections are only
/// touched by a successful settle, so a failed request leaves them as they were.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueStore {
    my_issues: Vec<Issue>,
    issues: Vec<Issue>,
    assigned_issues: Vec<Issue>,
    my_issues_freshness: Freshness,
    issues_freshness: Freshness,
    assigned_freshness: Freshness,
    loading: bool,
    error: Option<AppError>,
    success_message: Option<String>,
}

impl IssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self, collection: IssueCollection) -> &[Issue] {
        match collection {
            IssueCollection::Mine => &self.my_issues,
            IssueCollection::All => &self.issues,
            IssueCollection::Assigned => &self.assigned_issues,
        }
    }

    pub fn my_issues(&self) -> &[Issue] {
        &self.my_issues
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn assigned_issues(&self) -> &[Issue] {
        &self.assigned_issues
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn freshness(&self, collection: IssueCollection) -> Freshness {
        match collection {
            IssueCollection::Mine => self.my_issues_freshness,
            IssueCollection::All => self.issues_freshness,
            IssueCollection::Assigned => self.assigned_freshness,
        }
    }

    /// Whether a page showing `collection` should ask the backend for it.
    pub fn needs_fetch(&self, collection: IssueCollection) -> bool {
        self.freshness(collection) == Freshness::Stale && !self.loading
    }

    pub fn invalidate(&mut self, collection: IssueCollection) {
        *self.freshness_mut(collection) = Freshness::Stale;
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.success_message = None;
    }

    /// Drops everything, e.g. on logout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn settle_create(&mut self, outcome: Result<Issue, AppError>) {
        self.settle(outcome, |store, issue| {
            store.my_issues.push(issue);
            store.invalidate(IssueCollection::All);
            store.success_message = Some("Issue created successfully".to_string());
        });
    }

    /// Replaces `collection` wholesale with a fetched list.
    pub fn settle_fetch(&mut self, collection: IssueCollection, outcome: Result<Vec<Issue>, AppError>) {
        self.settle(outcome, |store, fetched| {
            *store.collection_mut(collection) = fetched;
            *store.freshness_mut(collection) = Freshness::Fresh;
        });
    }

    pub fn settle_delete(&mut self, issue_id: IssueId, outcome: Result<(), AppError>) {
        self.settle(outcome, |store, ()| {
            store.my_issues.retain(|issue| issue.id != issue_id);
            store.invalidate(IssueCollection::All);
            store.invalidate(IssueCollection::Assigned);
            store.success_message = Some("Issue deleted successfully".to_string());
        });
    }

    pub fn settle_assign(&mut self, outcome: Result<Issue, AppError>) {
        self.settle(outcome, |store, updated| {
            replace_by_id(&mut store.issues, &updated);
            store.invalidate(IssueCollection::Assigned);
            store.success_message = Some("Technicians assigned successfully".to_string());
        });
    }

    /// Patches the updated issue into every collection that holds it.
    pub fn settle_status(&mut self, outcome: Result<Issue, AppError>) {
        self.settle(outcome, |store, updated| {
            replace_by_id(&mut store.assigned_issues, &updated);
            replace_by_id(&mut store.issues, &updated);
            replace_by_id(&mut store.my_issues, &updated);
            store.success_message = Some("Status updated successfully".to_string());
        });
    }

    fn settle<T>(&mut self, outcome: Result<T, AppError>, apply: impl FnOnce(&mut Self, T)) {
        self.loading = false;
        match outcome {
            Ok(value) => apply(self, value),
            Err(err) => self.error = Some(err),
        }
    }

    fn collection_mut(&mut self, collection: IssueCollection) -> &mut Vec<Issue> {
        match collection {
            IssueCollection::Mine => &mut self.my_issues,
            IssueCollection::All => &mut self.issues,
            IssueCollection::Assigned => &mut self.assigned_issues,
        }
    }

    fn freshness_mut(&mut self, collection: IssueCollection) -> &mut Freshness {
        match collection {
            IssueCollection::Mine => &mut self.my_issues_freshness,
            IssueCollection::All => &mut self.issues_freshness,
            IssueCollection::Assigned => &mut self.assigned_freshness,
        }
    }
}

fn replace_by_id(issues: &mut [Issue], updated: &Issue) {
    for issue in issues.iter_mut().filter(|issue| issue.id == updated.id) {
        *issue = updated.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueStatus;

    fn issue(id: IssueId, title: &str) -> Issue {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    fn with_status(mut issue: Issue, status: IssueStatus) -> Issue {
        issue.status = status;
        issue
    }

    fn store_with(collection: IssueCollection, issues: Vec<Issue>) -> IssueStore {
        let mut store = IssueStore::new();
        store.begin();
        store.settle_fetch(collection, Ok(issues));
        store
    }

    #[test]
    fn test_begin_and_settle_toggle_loading() {
        let mut store = IssueStore::new();
        store.begin();
        assert!(store.loading());
        store.settle_fetch(IssueCollection::Mine, Ok(vec![]));
        assert!(!store.loading());
    }

    #[test]
    fn test_create_appends_to_my_issues() {
        let mut store = store_with(IssueCollection::Mine, vec![issue(1, "Broken light")]);

        let created: Issue = serde_json::from_value(serde_json::json!({
            "id": 42,
            "title": "Pothole on Main St",
            "description": "deep hole",
            "issueType": "POTHOLE",
            "status": "PENDING",
            "address": { "latitude": 12.9, "longitude": 77.6 }
        }))
        .unwrap();

        store.begin();
        store.settle_create(Ok(created.clone()));

        assert_eq!(store.my_issues().len(), 2);
        assert_eq!(store.my_issues().last(), Some(&created));
        assert_eq!(store.my_issues()[1].status, IssueStatus::Pending);
        assert_eq!(store.success_message(), Some("Issue created successfully"));
    }

    #[test]
    fn test_failed_create_keeps_collection() {
        let mut store = store_with(IssueCollection::Mine, vec![issue(1, "Broken light")]);
        let before = store.my_issues().to_vec();

        store.begin();
        store.settle_create(Err(AppError::backend(400, "Invalid issue type")));

        assert_eq!(store.my_issues(), before.as_slice());
        assert_eq!(store.error().map(AppError::user_message).as_deref(), Some("Invalid issue type"));
    }

    #[test]
    fn test_fetch_replaces_wholesale_and_marks_fresh() {
        let mut store = store_with(IssueCollection::All, vec![issue(1, "a"), issue(2, "b")]);
        assert!(!store.needs_fetch(IssueCollection::All));
        assert!(store.needs_fetch(IssueCollection::Assigned));

        store.begin();
        store.settle_fetch(IssueCollection::All, Ok(vec![issue(3, "c")]));
        assert_eq!(store.issues().len(), 1);
        assert_eq!(store.issues()[0].id, 3);
    }

    #[test]
    fn test_failed_fetch_stays_stale() {
        let mut store = IssueStore::new();
        store.begin();
        store.settle_fetch(IssueCollection::Mine, Err(AppError::Network("refused".into())));
        assert_eq!(store.freshness(IssueCollection::Mine), Freshness::Stale);
        assert!(store.error().is_some());
    }

    #[test]
    fn test_delete_removes_exactly_matching_issue() {
        let issues = vec![issue(1, "a"), issue(2, "b"), issue(3, "c")];
        let mut store = store_with(IssueCollection::Mine, issues.clone());

        store.begin();
        store.settle_delete(2, Ok(()));

        assert_eq!(store.my_issues(), &[issues[0].clone(), issues[2].clone()]);
    }

    #[test]
    fn test_failed_delete_leaves_collection_untouched() {
        let issues = vec![issue(1, "a"), issue(2, "b")];
        let mut store = store_with(IssueCollection::Mine, issues.clone());

        store.begin();
        store.settle_delete(2, Err(AppError::backend(403, "Forbidden")));

        assert_eq!(store.my_issues(), issues.as_slice());
        assert!(store.error().is_some());
    }

    #[test]
    fn test_mutations_invalidate_other_views() {
        let mut store = store_with(IssueCollection::All, vec![issue(1, "a")]);
        store.begin();
        store.settle_fetch(IssueCollection::Assigned, Ok(vec![issue(1, "a")]));

        store.begin();
        store.settle_assign(Ok(issue(1, "a")));
        assert_eq!(store.freshness(IssueCollection::All), Freshness::Fresh);
        assert_eq!(store.freshness(IssueCollection::Assigned), Freshness::Stale);

        store.begin();
        store.settle_create(Ok(issue(9, "new")));
        assert_eq!(store.freshness(IssueCollection::All), Freshness::Stale);
    }

    #[test]
    fn test_assign_replaces_only_in_all_issues() {
        let mut store = store_with(IssueCollection::All, vec![issue(1, "a"), issue(2, "b")]);
        store.begin();
        store.settle_fetch(IssueCollection::Mine, Ok(vec![issue(2, "b")]));

        let mut updated = issue(2, "b");
        updated.assigned_technicians =
            serde_json::from_value(serde_json::json!([{ "id": 5, "name": "Ravi" }])).unwrap();

        store.begin();
        store.settle_assign(Ok(updated.clone()));

        assert_eq!(store.issues()[1], updated);
        assert!(store.my_issues()[0].assigned_technicians.is_empty());
    }

    #[test]
    fn test_status_update_patches_every_collection_holding_the_issue() {
        let mut store = IssueStore::new();
        store.begin();
        store.settle_fetch(IssueCollection::Mine, Ok(vec![issue(1, "a"), issue(2, "b")]));
        store.begin();
        store.settle_fetch(IssueCollection::All, Ok(vec![issue(2, "b"), issue(3, "c")]));
        store.begin();
        store.settle_fetch(IssueCollection::Assigned, Ok(vec![issue(3, "c")]));

        let updated = with_status(issue(2, "b"), IssueStatus::Resolved);
        store.begin();
        store.settle_status(Ok(updated.clone()));

        assert_eq!(store.my_issues(), &[issue(1, "a"), updated.clone()]);
        assert_eq!(store.issues(), &[updated, issue(3, "c")]);
        assert_eq!(store.assigned_issues(), &[issue(3, "c")]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = store_with(IssueCollection::Mine, vec![issue(1, "a")]);
        store.reset();
        assert_eq!(store, IssueStore::default());
    }
}
