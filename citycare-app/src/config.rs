use citycare_errors::AppError;
use std::time::Duration;
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8083";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_HOURS: i64 = 8;

/// Server-side settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend_url: Url,
    pub http_timeout: Duration,
    /// Sessions expire after this long without a request.
    pub session_hours: i64,
    /// Mark the session cookie `Secure`; needs HTTPS in front of the server.
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let raw_url = lookup("CITYCARE_BACKEND_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = Url::parse(raw_url.trim())
            .map_err(|e| AppError::Config(format!("CITYCARE_BACKEND_URL {raw_url:?}: {e}")))?;
        if !matches!(backend_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "CITYCARE_BACKEND_URL must be http or https, got {}",
                backend_url.scheme()
            )));
        }

        let timeout_secs = parse_or("CITYCARE_HTTP_TIMEOUT_SECS", &lookup, DEFAULT_HTTP_TIMEOUT_SECS)?;
        let session_hours = parse_or("CITYCARE_SESSION_HOURS", &lookup, DEFAULT_SESSION_HOURS)?;
        if timeout_secs == 0 || session_hours <= 0 {
            return Err(AppError::Config(
                "timeouts and session lifetime must be positive".to_string(),
            ));
        }

        let secure_cookies = parse_or("CITYCARE_SECURE_COOKIES", &lookup, false)?;

        Ok(Self {
            backend_url,
            http_timeout: Duration::from_secs(timeout_secs),
            session_hours,
            secure_cookies,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} has an invalid value: {raw:?}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://localhost:8083/");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.session_hours, 8);
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("CITYCARE_BACKEND_URL", "https://api.citycare.example"),
            ("CITYCARE_HTTP_TIMEOUT_SECS", "5"),
            ("CITYCARE_SESSION_HOURS", "24"),
            ("CITYCARE_SECURE_COOKIES", "true"),
        ])
        .unwrap();
        assert!(config.secure_cookies);
        assert_eq!(config.backend_url.host_str(), Some("api.citycare.example"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.session_hours, 24);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            config(&[("CITYCARE_BACKEND_URL", "not a url")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config(&[("CITYCARE_BACKEND_URL", "ftp://files.example")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config(&[("CITYCARE_HTTP_TIMEOUT_SECS", "soon")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config(&[("CITYCARE_SESSION_HOURS", "0")]),
            Err(AppError::Config(_))
        ));
    }
}
