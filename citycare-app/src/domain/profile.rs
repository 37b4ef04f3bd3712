use super::issue::{Address, IssueCategory};
use super::null_as_default;
use super::roster::{Officer, Technician};
use serde::{Deserialize, Serialize};

/// Read access shared by every role's profile, used by the profile form.
pub trait ContactDetails {
    fn name(&self) -> &str;
    fn email(&self) -> &str;
    fn phone(&self) -> &str;

    /// Skill tags, for roles that carry them.
    fn skills(&self) -> Option<&[IssueCategory]> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenProfile {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<Address>,
}

impl ContactDetails for CitizenProfile {
    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> &str {
        &self.email
    }
    fn phone(&self) -> &str {
        &self.phone
    }
}

/// Officer and head profiles share one shape.
pub type StaffProfile = Officer;

impl ContactDetails for Officer {
    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> &str {
        &self.email
    }
    fn phone(&self) -> &str {
        &self.phone
    }
}

impl ContactDetails for Technician {
    fn name(&self) -> &str {
        &self.name
    }
    fn email(&self) -> &str {
        &self.email
    }
    fn phone(&self) -> &str {
        &self.phone
    }
    fn skills(&self) -> Option<&[IssueCategory]> {
        Some(&self.skills)
    }
}

/// Body of a profile update. The email is carried over unchanged from the
/// loaded profile; it cannot be edited after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<IssueCategory>>,
    /// Citizens only. Entries with an id edit that address, the rest are added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
}

impl ProfileUpdate {
    pub fn for_profile<P: ContactDetails>(profile: &P, name: String, phone: String) -> Self {
        Self {
            name,
            email: profile.email().to_string(),
            phone,
            skills: profile.skills().map(<[IssueCategory]>::to_vec),
            addresses: None,
        }
    }

    pub fn with_addresses(mut self, addresses: Vec<Address>) -> Self {
        self.addresses = Some(addresses);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AddressField;

    fn citizen() -> CitizenProfile {
        serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Asha",
            "email": "asha@example.com",
            "phone": null,
            "addresses": [{"id": 3, "name": "Home", "city": "Pune"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_update_leaves_out_addresses_unless_given() {
        let profile = citizen();
        let update = ProfileUpdate::for_profile(&profile, "Asha R".to_string(), "98450".to_string());
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["email"], "asha@example.com");
        assert!(body.get("addresses").is_none());
        assert!(body.get("skills").is_none());
    }

    #[test]
    fn test_update_sends_edited_and_new_addresses() {
        let profile = citizen();
        let mut home = profile.addresses[0].clone();
        home.set_field(AddressField::PinCode, "411001".to_string());
        let mut office = Address::default();
        office.set_field(AddressField::Name, "Office".to_string());

        let update = ProfileUpdate::for_profile(&profile, profile.name.clone(), String::new())
            .with_addresses(vec![home, office]);
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["addresses"][0]["id"], 3);
        assert_eq!(body["addresses"][0]["pinCode"], "411001");
        assert_eq!(body["addresses"][0]["city"], "Pune");
        assert!(body["addresses"][1]["id"].is_null());
        assert_eq!(body["addresses"][1]["name"], "Office");
    }
}
