use super::Freshness;
use crate::domain::RosterEntry;
use citycare_errors::AppError;

/// Staff list managed by the signed-in user: technicians for an officer,
/// officers for a head.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStore<T> {
    entries: Vec<T>,
    freshness: Freshness,
    loading: bool,
    error: Option<AppError>,
    success_message: Option<String>,
}

impl<T> Default for RosterStore<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            freshness: Freshness::Stale,
            loading: false,
            error: None,
            success_message: None,
        }
    }
}

impl<T: RosterEntry> RosterStore<T> {
    pub fn entries(&self) -> &[T] {
        &self.entries
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

    pub fn needs_fetch(&self) -> bool {
        self.freshness == Freshness::Stale && !self.loading
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.success_message = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn settle_fetch(&mut self, outcome: Result<Vec<T>, AppError>) {
        self.loading = false;
        match outcome {
            Ok(entries) => {
                self.entries = entries;
                self.freshness = Freshness::Fresh;
            }
            Err(err) => self.error = Some(err),
        }
    }

    pub fn settle_create(&mut self, outcome: Result<T, AppError>) {
        self.loading = false;
        match outcome {
            Ok(entry) => {
                self.entries.push(entry);
                self.success_message = Some("Created successfully".to_string());
            }
            Err(err) => self.error = Some(err),
        }
    }

    pub fn settle_delete(&mut self, id: i64, outcome: Result<(), AppError>) {
        self.loading = false;
        match outcome {
            Ok(()) => {
                self.entries.retain(|entry| entry.id() != id);
                self.success_message = Some("Deleted successfully".to_string());
            }
            Err(err) => self.error = Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueCategory, Technician};

    fn technician(id: i64) -> Technician {
        Technician {
            id,
            name: format!("tech-{id}"),
            email: format!("tech{id}@city.gov"),
            phone: String::new(),
            skills: vec![IssueCategory::WaterLeak],
        }
    }

    #[test]
    fn test_create_appends_and_delete_removes_by_id() {
        let mut roster = RosterStore::default();
        roster.settle_fetch(Ok(vec![technician(1), technician(2)]));

        roster.begin();
        roster.settle_create(Ok(technician(3)));
        assert_eq!(roster.entries().len(), 3);

        roster.begin();
        roster.settle_delete(2, Ok(()));
        let ids: Vec<_> = roster.entries().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_failed_delete_keeps_entry() {
        let mut roster = RosterStore::default();
        roster.settle_fetch(Ok(vec![technician(1)]));
        roster.begin();
        roster.settle_delete(1, Err(AppError::backend(500, "Technician has open issues")));
        assert_eq!(roster.entries().len(), 1);
        assert_eq!(
            roster.error().map(AppError::user_message).as_deref(),
            Some("Technician has open issues")
        );
    }
}
