use crate::domain::{
    Address, AddressField, IssueCategory, LoginRequest, NewIssue, NewOfficer, NewTechnician,
    PasswordChange, Role, SignupRequest,
};
use regex_lite::Regex;
use std::sync::OnceLock;

const MAX_TITLE_LENGTH: usize = 120;
const MAX_DESCRIPTION_LENGTH: usize = 2000;
const MAX_COMMENT_LENGTH: usize = 500;
const MAX_URL_LENGTH: usize = 2048;
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} is too long (max {1} characters)")]
    TooLong(&'static str, usize),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Latitude and longitude are required")]
    MissingLocation,

    #[error("{0} must be a number between {1} and {2}")]
    OutOfRange(&'static str, f64, f64),

    #[error("Unknown issue category: {0}")]
    UnknownCategory(String),

    #[error("Not a valid image link: {0}")]
    InvalidImageUrl(String),

    #[error("Select at least one technician")]
    NoTechnicianSelected,

    #[error("Select at least one skill")]
    NoSkillSelected,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

/// Passwords and codes are sent exactly as typed.
fn secret(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    if value.chars().count() > max {
        return Err(ValidationError::TooLong(field, max));
    }
    Ok(value)
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = required("Email", email)?;
    if !email_pattern().is_match(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_lowercase())
}

fn coordinate(field: &'static str, raw: &str, limit: f64) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingLocation);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() <= limit)
        .ok_or(ValidationError::OutOfRange(field, -limit, limit))
}

fn image_url(raw: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidImageUrl(raw.to_string());
    if raw.len() > MAX_URL_LENGTH {
        return Err(invalid());
    }
    let parsed = url::Url::parse(raw).map_err(|_| invalid())?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(parsed.to_string())
}

/// Raw contents of the report form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub address_name: String,
    pub street_address: String,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub mobile: String,
    pub latitude: String,
    pub longitude: String,
    /// One link per line.
    pub image_urls: String,
}

impl IssueDraft {
    pub fn validate(&self) -> Result<NewIssue, ValidationError> {
        let title = bounded("Title", &self.title, MAX_TITLE_LENGTH)?;
        let description = bounded("Description", &self.description, MAX_DESCRIPTION_LENGTH)?;

        let category = IssueCategory::from(required("Category", &self.category)?);
        if let IssueCategory::Other(raw) = category {
            return Err(ValidationError::UnknownCategory(raw));
        }

        let latitude = coordinate("Latitude", &self.latitude, 90.0)?;
        let longitude = coordinate("Longitude", &self.longitude, 180.0)?;

        let image_urls = self
            .image_urls
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(image_url)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewIssue {
            title,
            description,
            issue_type: category.as_str().to_string(),
            address_name: optional(&self.address_name),
            street_address: optional(&self.street_address),
            locality: optional(&self.locality),
            city: optional(&self.city),
            state: optional(&self.state),
            pin_code: optional(&self.pin_code),
            mobile: optional(&self.mobile),
            latitude,
            longitude,
            image_urls,
        })
    }
}

/// Login form. `secret` is the password or the OTP depending on `use_otp`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginDraft {
    pub email: String,
    pub secret: String,
    pub use_otp: bool,
    pub role: Role,
}

impl LoginDraft {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let email = validate_email(&self.email)?;
        let (password, otp) = if self.use_otp {
            (None, Some(required("OTP", &self.secret)?))
        } else {
            (Some(secret("Password", &self.secret)?), None)
        };
        Ok(LoginRequest {
            email,
            password,
            otp,
            role: Some(self.role),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub otp: String,
}

impl SignupDraft {
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        let name = required("Name", &self.name)?;
        let email = validate_email(&self.email)?;
        let phone = required("Phone", &self.phone)?;
        let password = secret("Password", &self.password)?;
        if password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        let otp = required("OTP", &self.otp)?;
        Ok(SignupRequest {
            name,
            email,
            password,
            phone,
            otp,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordDraft {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordDraft {
    pub fn validate(&self) -> Result<PasswordChange, ValidationError> {
        let old_password = secret("Current password", &self.old_password)?;
        let new_password = secret("New password", &self.new_password)?;
        if new_password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(PasswordChange {
            old_password,
            new_password,
        })
    }
}

/// Form for a new technician or officer; skills are ignored for officers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub skills: Vec<IssueCategory>,
}

impl StaffDraft {
    pub fn validate_technician(&self) -> Result<NewTechnician, ValidationError> {
        let officer = self.validate_officer()?;
        if self.skills.is_empty() {
            return Err(ValidationError::NoSkillSelected);
        }
        Ok(NewTechnician {
            name: officer.name,
            email: officer.email,
            phone: officer.phone,
            password: officer.password,
            skills: self.skills.clone(),
        })
    }

    pub fn validate_officer(&self) -> Result<NewOfficer, ValidationError> {
        Ok(NewOfficer {
            name: required("Name", &self.name)?,
            email: validate_email(&self.email)?,
            phone: required("Phone", &self.phone)?,
            password: secret("Password", &self.password)?,
        })
    }
}

pub fn validate_profile(name: &str, phone: &str) -> Result<(String, String), ValidationError> {
    Ok((required("Name", name)?, required("Phone", phone)?))
}

/// Trims every field, skips new entries left blank and requires a label on
/// the rest.
pub fn validate_addresses(addresses: &[Address]) -> Result<Vec<Address>, ValidationError> {
    addresses
        .iter()
        .filter(|address| address.id.is_some() || !address.is_blank())
        .map(|address| {
            let mut cleaned = address.clone();
            for field in AddressField::ALL {
                cleaned.set_field(field, address.field(field).trim().to_string());
            }
            if cleaned.field(AddressField::Name).is_empty() {
                return Err(ValidationError::Required("Address label"));
            }
            Ok(cleaned)
        })
        .collect()
}

pub fn validate_assignment(technician_ids: &[i64]) -> Result<Vec<i64>, ValidationError> {
    if technician_ids.is_empty() {
        return Err(ValidationError::NoTechnicianSelected);
    }
    let mut ids = technician_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

pub fn validate_comment(comment: &str) -> Result<(), ValidationError> {
    if comment.trim().chars().count() > MAX_COMMENT_LENGTH {
        return Err(ValidationError::TooLong("Comment", MAX_COMMENT_LENGTH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pothole_draft() -> IssueDraft {
        IssueDraft {
            title: "Pothole on Main St".to_string(),
            description: "deep hole".to_string(),
            category: "POTHOLE".to_string(),
            latitude: "12.9".to_string(),
            longitude: "77.6".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_issue_draft() {
        let new_issue = pothole_draft().validate().unwrap();
        assert_eq!(new_issue.title, "Pothole on Main St");
        assert_eq!(new_issue.issue_type, "POTHOLE");
        assert_eq!(new_issue.latitude, 12.9);
        assert_eq!(new_issue.longitude, 77.6);
        assert_eq!(new_issue.city, None);
    }

    #[test]
    fn test_issue_draft_requires_fields() {
        let mut draft = pothole_draft();
        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::Required("Title")));

        let mut draft = pothole_draft();
        draft.latitude.clear();
        assert_eq!(draft.validate(), Err(ValidationError::MissingLocation));

        let mut draft = pothole_draft();
        draft.longitude = "200".to_string();
        assert!(matches!(draft.validate(), Err(ValidationError::OutOfRange("Longitude", ..))));

        let mut draft = pothole_draft();
        draft.category = "SINKHOLE".to_string();
        assert!(matches!(draft.validate(), Err(ValidationError::UnknownCategory(_))));
    }

    #[test]
    fn test_issue_draft_image_links() {
        let mut draft = pothole_draft();
        draft.image_urls = "https://img.example/a.jpg\n\n  https://img.example/b.jpg ".to_string();
        assert_eq!(draft.validate().unwrap().image_urls.len(), 2);

        draft.image_urls = "ftp://img.example/a.jpg".to_string();
        assert!(matches!(draft.validate(), Err(ValidationError::InvalidImageUrl(_))));
    }

    #[test]
    fn test_login_draft_picks_secret_kind() {
        let draft = LoginDraft {
            email: "Citizen@Example.com".to_string(),
            secret: "123456".to_string(),
            use_otp: true,
            role: Role::Citizen,
        };
        let request = draft.validate().unwrap();
        assert_eq!(request.email, "citizen@example.com");
        assert_eq!(request.otp.as_deref(), Some("123456"));
        assert_eq!(request.password, None);
    }

    #[test]
    fn test_passwords_keep_surrounding_spaces() {
        let login = LoginDraft {
            email: "citizen@example.com".to_string(),
            secret: "  pass word ".to_string(),
            use_otp: false,
            role: Role::Citizen,
        };
        assert_eq!(login.validate().unwrap().password.as_deref(), Some("  pass word "));

        let change = PasswordDraft {
            old_password: " old ".to_string(),
            new_password: "new ".to_string(),
            confirm_password: "new ".to_string(),
        };
        let change = change.validate().unwrap();
        assert_eq!(change.old_password, " old ");
        assert_eq!(change.new_password, "new ");

        let blank = PasswordDraft {
            old_password: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(blank.validate(), Err(ValidationError::Required("Current password")));
    }

    #[test]
    fn test_missing_coordinates_message() {
        let mut draft = pothole_draft();
        draft.longitude = " ".to_string();
        let err = draft.validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingLocation);
        assert_eq!(err.to_string(), "Latitude and longitude are required");
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(validate_email("not-an-email"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email(""), Err(ValidationError::Required("Email")));
    }

    #[test]
    fn test_password_confirmation_must_match() {
        let draft = PasswordDraft {
            old_password: "old".to_string(),
            new_password: "new-secret".to_string(),
            confirm_password: "new-secert".to_string(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_signup_password_mismatch() {
        let draft = SignupDraft {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "98450".to_string(),
            password: "a".to_string(),
            confirm_password: "b".to_string(),
            otp: "111111".to_string(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_technician_needs_skills() {
        let draft = StaffDraft {
            name: "Ravi".to_string(),
            email: "ravi@city.gov".to_string(),
            phone: "555".to_string(),
            password: "pw".to_string(),
            skills: vec![],
        };
        assert_eq!(draft.validate_technician(), Err(ValidationError::NoSkillSelected));
        assert!(draft.validate_officer().is_ok());
    }

    #[test]
    fn test_addresses_are_trimmed_and_blank_new_ones_dropped() {
        let mut home = Address {
            id: Some(3),
            ..Default::default()
        };
        home.set_field(AddressField::Name, " Home ".to_string());
        home.set_field(AddressField::City, "Pune  ".to_string());
        let untouched = Address::default();

        let cleaned = validate_addresses(&[home, untouched]).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].field(AddressField::Name), "Home");
        assert_eq!(cleaned[0].city.as_deref(), Some("Pune"));
        assert_eq!(cleaned[0].locality, None);
    }

    #[test]
    fn test_address_needs_a_label() {
        let mut office = Address::default();
        office.set_field(AddressField::StreetAddress, "MG Road".to_string());
        assert_eq!(
            validate_addresses(&[office]),
            Err(ValidationError::Required("Address label"))
        );
    }

    #[test]
    fn test_assignment_requires_a_technician() {
        assert_eq!(validate_assignment(&[]), Err(ValidationError::NoTechnicianSelected));
        assert_eq!(validate_assignment(&[3, 1, 3]), Ok(vec![1, 3]));
    }
}
