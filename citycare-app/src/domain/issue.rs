use super::null_as_default;
use super::roster::Technician;
use super::vote::{Vote, VoteTally};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type IssueId = i64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown issue status: {s}"))
    }
}

/// Issue category. Also used as a technician skill tag.
///
/// Categories the client does not know about are kept verbatim in
/// [`IssueCategory::Other`] so a new backend category never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueCategory {
    Pothole,
    RoadDamage,
    BrokenStreetlight,
    GarbageOverflow,
    WaterLeak,
    StreetFlooding,
    TrafficSignalIssue,
    IllegalParking,
    NoisePollution,
    PublicToiletIssue,
    Vandalism,
    Other(String),
}

impl IssueCategory {
    pub const KNOWN: [IssueCategory; 11] = [
        Self::Pothole,
        Self::RoadDamage,
        Self::BrokenStreetlight,
        Self::GarbageOverflow,
        Self::WaterLeak,
        Self::StreetFlooding,
        Self::TrafficSignalIssue,
        Self::IllegalParking,
        Self::NoisePollution,
        Self::PublicToiletIssue,
        Self::Vandalism,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pothole => "POTHOLE",
            Self::RoadDamage => "ROAD_DAMAGE",
            Self::BrokenStreetlight => "BROKEN_STREETLIGHT",
            Self::GarbageOverflow => "GARBAGE_OVERFLOW",
            Self::WaterLeak => "WATER_LEAK",
            Self::StreetFlooding => "STREET_FLOODING",
            Self::TrafficSignalIssue => "TRAFFIC_SIGNAL_ISSUE",
            Self::IllegalParking => "ILLEGAL_PARKING",
            Self::NoisePollution => "NOISE_POLLUTION",
            Self::PublicToiletIssue => "PUBLIC_TOILET_ISSUE",
            Self::Vandalism => "VANDALISM",
            Self::Other(raw) => raw,
        }
    }

    /// "ROAD_DAMAGE" -> "Road damage"
    pub fn label(&self) -> String {
        let lower = self.as_str().replace('_', " ").to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for IssueCategory {
    fn from(raw: String) -> Self {
        let normalized = raw.trim().to_uppercase();
        Self::KNOWN
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .unwrap_or(Self::Other(raw))
    }
}

impl From<IssueCategory> for String {
    fn from(category: IssueCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub street_address: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
    pub mobile: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Address {
    /// Human readable one-liner, skipping empty parts.
    pub fn summary(&self) -> String {
        [
            &self.street_address,
            &self.locality,
            &self.city,
            &self.state,
            &self.pin_code,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    pub fn field(&self, field: AddressField) -> &str {
        let value = match field {
            AddressField::Name => &self.name,
            AddressField::StreetAddress => &self.street_address,
            AddressField::Locality => &self.locality,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::PinCode => &self.pin_code,
            AddressField::Mobile => &self.mobile,
        };
        value.as_deref().unwrap_or_default()
    }

    pub fn set_field(&mut self, field: AddressField, value: String) {
        let slot = match field {
            AddressField::Name => &mut self.name,
            AddressField::StreetAddress => &mut self.street_address,
            AddressField::Locality => &mut self.locality,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::PinCode => &mut self.pin_code,
            AddressField::Mobile => &mut self.mobile,
        };
        *slot = (!value.trim().is_empty()).then_some(value);
    }

    /// No text in any editable field.
    pub fn is_blank(&self) -> bool {
        AddressField::ALL
            .into_iter()
            .all(|field| self.field(field).trim().is_empty())
    }
}

/// The text fields a citizen edits on a saved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Name,
    StreetAddress,
    Locality,
    City,
    State,
    PinCode,
    Mobile,
}

impl AddressField {
    pub const ALL: [AddressField; 7] = [
        Self::Name,
        Self::StreetAddress,
        Self::Locality,
        Self::City,
        Self::State,
        Self::PinCode,
        Self::Mobile,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Label (Home, Office...)",
            Self::StreetAddress => "Street address",
            Self::Locality => "Locality",
            Self::City => "City",
            Self::State => "State",
            Self::PinCode => "PIN code",
            Self::Mobile => "Mobile",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub issue_type: Option<IssueCategory>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: IssueStatus,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: Vec<Vote>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_technicians: Vec<Technician>,
    #[serde(default)]
    pub reported_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub resolved_at: Option<NaiveDateTime>,
}

impl Issue {
    pub fn attachment_urls(&self) -> impl Iterator<Item = &str> {
        self.attachments
            .iter()
            .map(|attachment| attachment.image_url.as_str())
            .filter(|url| !url.is_empty())
    }

    pub fn tally(&self) -> VoteTally {
        VoteTally::from_votes(&self.votes)
    }

    pub fn category_label(&self) -> String {
        self.issue_type
            .as_ref()
            .map(IssueCategory::label)
            .unwrap_or_else(|| "Uncategorized".to_string())
    }
}

/// Payload for `POST /api/issues/create`. Address parts are flattened the
/// way the backend expects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub issue_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_decodes_backend_shape() {
        let json = r#"{
            "id": 7,
            "title": "Pothole on Main St",
            "description": "deep hole",
            "issueType": "POTHOLE",
            "status": "IN_PROGRESS",
            "reportedAt": "2024-05-01T10:15:30.123",
            "resolvedAt": null,
            "attachments": [{"id": 1, "imageUrl": "https://img.example/1.jpg"}],
            "votes": [{"id": 3, "upvote": true, "comment": "same here"}],
            "address": {"city": "Bengaluru", "latitude": 12.9, "longitude": 77.6},
            "assignedTechnicians": [{"id": 4, "name": "Ravi", "skills": ["POTHOLE"]}]
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.status, IssueStatus::InProgress);
        assert_eq!(issue.issue_type, Some(IssueCategory::Pothole));
        assert_eq!(
            issue.attachment_urls().collect::<Vec<_>>(),
            vec!["https://img.example/1.jpg"]
        );
        assert_eq!(issue.address.unwrap().coordinates(), Some((12.9, 77.6)));
        assert_eq!(issue.assigned_technicians[0].skills, vec![IssueCategory::Pothole]);
        assert!(issue.reported_at.is_some());
    }

    #[test]
    fn test_issue_tolerates_nulls_and_unknown_category() {
        let json = r#"{"id": 1, "title": null, "issueType": "SINKHOLE", "votes": null, "status": null}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.title, "");
        assert_eq!(issue.status, IssueStatus::Pending);
        assert_eq!(
            issue.issue_type,
            Some(IssueCategory::Other("SINKHOLE".to_string()))
        );
        assert!(issue.votes.is_empty());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("in_progress".parse::<IssueStatus>(), Ok(IssueStatus::InProgress));
        assert!("CLOSED".parse::<IssueStatus>().is_err());
    }

    #[test]
    fn test_category_label() {
        assert_eq!(IssueCategory::TrafficSignalIssue.label(), "Traffic signal issue");
    }

    #[test]
    fn test_new_issue_wire_format() {
        let new_issue = NewIssue {
            title: "Pothole on Main St".to_string(),
            description: "deep hole".to_string(),
            issue_type: "POTHOLE".to_string(),
            latitude: 12.9,
            longitude: 77.6,
            ..Default::default()
        };
        let value = serde_json::to_value(&new_issue).unwrap();
        assert_eq!(value["issueType"], "POTHOLE");
        assert_eq!(value["latitude"], 12.9);
        assert!(value.get("addressName").is_none());
        assert!(value.get("imageUrls").is_none());
    }
}
