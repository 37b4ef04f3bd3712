use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_CITIZEN", alias = "CITIZEN")]
    Citizen,
    #[serde(rename = "ROLE_OFFICER", alias = "OFFICER")]
    Officer,
    #[serde(rename = "ROLE_TECHNICIAN", alias = "TECHNICIAN")]
    Technician,
    #[serde(rename = "ROLE_HEAD", alias = "HEAD")]
    Head,
}

impl Role {
    pub const ALL: [Role; 4] = [Self::Citizen, Self::Officer, Self::Technician, Self::Head];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "ROLE_CITIZEN",
            Self::Officer => "ROLE_OFFICER",
            Self::Technician => "ROLE_TECHNICIAN",
            Self::Head => "ROLE_HEAD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Citizen => "Citizen",
            Self::Officer => "Officer",
            Self::Technician => "Technician",
            Self::Head => "Head",
        }
    }

    /// Landing page after sign-in.
    pub fn home_path(&self) -> &'static str {
        match self {
            Self::Citizen => "/my-issues",
            Self::Officer => "/all-issues",
            Self::Technician => "/technician-issues",
            Self::Head => "/officers",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        let wanted = wanted.strip_prefix("ROLE_").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

/// Credentials of a signed-in user, handed explicitly to every backend call.
///
/// Created from a successful login or signup and dropped on logout.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub role: Role,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    #[serde(default)]
    pub message: Option<String>,
    pub role: Role,
}

impl From<AuthResponse> for SessionContext {
    fn from(response: AuthResponse) -> Self {
        Self::new(response.jwt, response.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequest {
    pub email: String,
    pub role: Role,
}

/// Password or OTP login; exactly one of the two secrets is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub otp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_accepts_prefixed_and_bare_names() {
        assert_eq!("ROLE_OFFICER".parse::<Role>(), Ok(Role::Officer));
        assert_eq!("technician".parse::<Role>(), Ok(Role::Technician));
        assert!("MAYOR".parse::<Role>().is_err());
    }

    #[test]
    fn test_auth_response_becomes_session() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"jwt":"abc","message":"Login success","role":"ROLE_HEAD"}"#)
                .unwrap();
        let session = SessionContext::from(response);
        assert_eq!(session.role, Role::Head);
        assert_eq!(session.bearer(), "Bearer abc");
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = SessionContext::new("secret-token", Role::Citizen);
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
