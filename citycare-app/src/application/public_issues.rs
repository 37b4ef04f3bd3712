use crate::domain::{Issue, VoteTally};
use citycare_errors::AppError;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Backend order, untouched.
    #[default]
    Default,
    Upvotes,
    Downvotes,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [Self::Default, Self::Upvotes, Self::Downvotes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "none",
            Self::Upvotes => "upvotes",
            Self::Downvotes => "downvotes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Upvotes => "Sort by Upvotes",
            Self::Downvotes => "Sort by Downvotes",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .unwrap_or_default())
    }
}

/// An issue with its vote counts derived from the embedded vote list.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedIssue {
    pub issue: Issue,
    pub tally: VoteTally,
}

pub fn rank(issues: &[Issue]) -> Vec<RankedIssue> {
    issues
        .iter()
        .map(|issue| RankedIssue {
            tally: issue.tally(),
            issue: issue.clone(),
        })
        .collect()
}

/// Stable ordering over a copy; `ranked` itself is never reordered.
pub fn ordered(ranked: &[RankedIssue], order: SortOrder) -> Vec<RankedIssue> {
    let mut view = ranked.to_vec();
    match order {
        SortOrder::Default => {}
        SortOrder::Upvotes => view.sort_by_key(|entry| Reverse(entry.tally.upvotes)),
        SortOrder::Downvotes => view.sort_by_key(|entry| Reverse(entry.tally.downvotes)),
    }
    view
}

/// Public issue list with locally derived vote counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicIssueList {
    ranked: Vec<RankedIssue>,
    order: SortOrder,
    loaded: bool,
    loading: bool,
    error: Option<AppError>,
}

impl PublicIssueList {
    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Takes a fresh source list and recomputes every derived count.
    pub fn settle_fetch(&mut self, outcome: Result<Vec<Issue>, AppError>) {
        self.loading = false;
        match outcome {
            Ok(issues) => {
                self.ranked = rank(&issues);
                self.loaded = true;
            }
            Err(err) => self.error = Some(err),
        }
    }

    pub fn view(&self) -> Vec<RankedIssue> {
        ordered(&self.ranked, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: i64, flags: &[bool]) -> Issue {
        let votes: Vec<_> = flags
            .iter()
            .map(|flag| serde_json::json!({ "upvote": flag }))
            .collect();
        serde_json::from_value(serde_json::json!({ "id": id, "votes": votes })).unwrap()
    }

    fn ids(view: &[RankedIssue]) -> Vec<i64> {
        view.iter().map(|entry| entry.issue.id).collect()
    }

    fn sample() -> Vec<Issue> {
        vec![
            issue(1, &[true, false]),
            issue(2, &[true, true, true]),
            issue(3, &[false, false, false, true]),
            issue(4, &[]),
            issue(5, &[true, true, true, false]),
        ]
    }

    #[test]
    fn test_derived_counts_match_embedded_votes() {
        for entry in rank(&sample()) {
            let ups = entry.issue.votes.iter().filter(|v| v.upvote).count();
            let downs = entry.issue.votes.iter().filter(|v| !v.upvote).count();
            assert_eq!(entry.tally.upvotes, ups);
            assert_eq!(entry.tally.downvotes, downs);
            assert_eq!(entry.tally.total(), entry.issue.votes.len());
        }
    }

    #[test]
    fn test_sort_by_upvotes_is_descending_and_stable() {
        let ranked = rank(&sample());
        assert_eq!(ids(&ordered(&ranked, SortOrder::Upvotes)), vec![2, 5, 1, 3, 4]);
    }

    #[test]
    fn test_sort_by_downvotes_is_descending_and_stable() {
        let ranked = rank(&sample());
        assert_eq!(ids(&ordered(&ranked, SortOrder::Downvotes)), vec![3, 1, 5, 2, 4]);
    }

    #[test]
    fn test_default_after_sorting_restores_original_order() {
        let mut list = PublicIssueList::default();
        list.begin();
        list.settle_fetch(Ok(sample()));

        list.set_order(SortOrder::Upvotes);
        let _ = list.view();
        list.set_order(SortOrder::Downvotes);
        let _ = list.view();
        list.set_order(SortOrder::Default);

        assert_eq!(ids(&list.view()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_new_source_recomputes_counts() {
        let mut list = PublicIssueList::default();
        list.settle_fetch(Ok(vec![issue(1, &[true])]));
        assert_eq!(list.view()[0].tally.upvotes, 1);

        list.settle_fetch(Ok(vec![issue(1, &[true, true, false])]));
        assert_eq!(list.view()[0].tally.upvotes, 2);
        assert_eq!(list.view()[0].tally.downvotes, 1);
    }

    #[test]
    fn test_sort_order_parsing_defaults() {
        assert_eq!("upvotes".parse::<SortOrder>().unwrap(), SortOrder::Upvotes);
        assert_eq!("anything".parse::<SortOrder>().unwrap(), SortOrder::Default);
    }
}
