use crate::domain::Role;
use citycare_errors::AppError;

/// What the browser knows about the session: only the role.
///
/// The bearer token stays on the server inside the cookie-keyed session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    role: Option<Role>,
    otp_sent: bool,
    loading: bool,
    error: Option<AppError>,
}

impl AuthState {
    pub fn signed_in(role: Option<Role>) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_logged_in(&self) -> bool {
        self.role.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub fn otp_sent(&self) -> bool {
        self.otp_sent
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset_otp(&mut self) {
        self.otp_sent = false;
    }

    pub fn settle_otp(&mut self, outcome: Result<(), AppError>) {
        self.loading = false;
        match outcome {
            Ok(()) => self.otp_sent = true,
            Err(err) => self.error = Some(err),
        }
    }

    /// Login and signup both end here.
    pub fn settle_login(&mut self, outcome: Result<Role, AppError>) {
        self.loading = false;
        match outcome {
            Ok(role) => {
                self.role = Some(role);
                self.otp_sent = false;
            }
            Err(err) => self.error = Some(err),
        }
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_then_login() {
        let mut auth = AuthState::default();
        auth.begin();
        auth.settle_otp(Ok(()));
        assert!(auth.otp_sent());

        auth.begin();
        auth.settle_login(Ok(Role::Citizen));
        assert!(auth.is_logged_in());
        assert!(auth.has_role(Role::Citizen));
        assert!(!auth.otp_sent());
    }

    #[test]
    fn test_failed_login_stays_logged_out() {
        let mut auth = AuthState::default();
        auth.begin();
        auth.settle_login(Err(AppError::backend(401, "Invalid OTP")));
        assert!(!auth.is_logged_in());
        assert!(auth.error().is_some());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut auth = AuthState::signed_in(Some(Role::Head));
        auth.logout();
        assert_eq!(auth, AuthState::default());
    }
}
