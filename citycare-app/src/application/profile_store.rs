use super::Freshness;
use citycare_errors::AppError;

/// Profile of the signed-in user plus password-change feedback.
///
/// One instance per role; they never share state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStore<P> {
    profile: Option<P>,
    freshness: Freshness,
    loading: bool,
    error: Option<AppError>,
    success_message: Option<String>,
}

impl<P> Default for ProfileStore<P> {
    fn default() -> Self {
        Self {
            profile: None,
            freshness: Freshness::Stale,
            loading: false,
            error: None,
            success_message: None,
        }
    }
}

impl<P> ProfileStore<P> {
    pub fn profile(&self) -> Option<&P> {
        self.profile.as_ref()
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

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.success_message = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn settle_fetch(&mut self, outcome: Result<P, AppError>) {
        self.loading = false;
        match outcome {
            Ok(profile) => {
                self.profile = Some(profile);
                self.freshness = Freshness::Fresh;
            }
            Err(err) => {
                self.profile = None;
                self.error = Some(err);
            }
        }
    }

    /// A failed update keeps the previously loaded profile.
    pub fn settle_update(&mut self, outcome: Result<P, AppError>) {
        self.loading = false;
        match outcome {
            Ok(profile) => {
                self.profile = Some(profile);
                self.freshness = Freshness::Fresh;
                self.success_message = Some("Profile updated successfully".to_string());
            }
            Err(err) => self.error = Some(err),
        }
    }

    /// `outcome` carries the backend's confirmation text.
    pub fn settle_password(&mut self, outcome: Result<String, AppError>) {
        self.loading = false;
        match outcome {
            Ok(message) if message.trim().is_empty() => {
                self.success_message = Some("Password updated successfully".to_string());
            }
            Ok(message) => self.success_message = Some(message),
            Err(err) => self.error = Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StaffProfile;

    fn officer(name: &str) -> StaffProfile {
        StaffProfile {
            id: 1,
            name: name.to_string(),
            email: "o@city.gov".to_string(),
            phone: "555".to_string(),
        }
    }

    #[test]
    fn test_fetch_marks_fresh() {
        let mut store = ProfileStore::default();
        assert!(store.needs_fetch());
        store.begin();
        assert!(!store.needs_fetch());
        store.settle_fetch(Ok(officer("Meera")));
        assert!(!store.needs_fetch());
        assert_eq!(store.profile().map(|p| p.name.as_str()), Some("Meera"));
    }

    #[test]
    fn test_failed_fetch_drops_profile() {
        let mut store = ProfileStore::default();
        store.settle_fetch(Ok(officer("Meera")));
        store.begin();
        store.settle_fetch(Err(AppError::backend(401, "")));
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_failed_update_keeps_profile() {
        let mut store = ProfileStore::default();
        store.settle_fetch(Ok(officer("Meera")));
        store.begin();
        store.settle_update(Err(AppError::Network("timeout".into())));
        assert_eq!(store.profile(), Some(&officer("Meera")));
        assert!(store.success_message().is_none());
    }

    #[test]
    fn test_password_message_uses_backend_text() {
        let mut store: ProfileStore<StaffProfile> = ProfileStore::default();
        store.begin();
        store.settle_password(Ok("Password updated".to_string()));
        assert_eq!(store.success_message(), Some("Password updated"));

        store.begin();
        store.settle_password(Ok(String::new()));
        assert_eq!(store.success_message(), Some("Password updated successfully"));
    }
}
