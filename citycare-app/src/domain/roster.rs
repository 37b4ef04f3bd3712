use super::issue::IssueCategory;
use super::null_as_default;
use serde::{Deserialize, Serialize};

/// Anything kept in a list and removed again by id.
pub trait RosterEntry {
    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<IssueCategory>,
}

impl Technician {
    pub fn has_skill(&self, category: &IssueCategory) -> bool {
        self.skills.contains(category)
    }
}

/// Technicians whose skills cover `category` first, otherwise in roster order.
pub fn suited_first(technicians: &[Technician], category: Option<&IssueCategory>) -> Vec<Technician> {
    let mut ordered = technicians.to_vec();
    if let Some(category) = category {
        ordered.sort_by_key(|technician| !technician.has_skill(category));
    }
    ordered
}

impl RosterEntry for Technician {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

impl RosterEntry for Officer {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTechnician {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub skills: Vec<IssueCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOfficer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technician(id: i64, skills: Vec<IssueCategory>) -> Technician {
        Technician {
            id,
            name: format!("tech-{id}"),
            email: String::new(),
            phone: String::new(),
            skills,
        }
    }

    #[test]
    fn test_technician_tolerates_null_fields() {
        let json = r#"{"id": 4, "name": null, "skills": null}"#;
        let technician: Technician = serde_json::from_str(json).unwrap();
        assert_eq!(technician.name, "");
        assert!(technician.skills.is_empty());
    }

    #[test]
    fn test_unknown_skill_is_kept() {
        let json = r#"{"id": 4, "skills": ["WATER_LEAK", "TREE_FALL"]}"#;
        let technician: Technician = serde_json::from_str(json).unwrap();
        assert!(technician.has_skill(&IssueCategory::WaterLeak));
        assert_eq!(technician.skills[1], IssueCategory::Other("TREE_FALL".to_string()));
    }

    #[test]
    fn test_suited_first_is_stable() {
        let roster = vec![
            technician(1, vec![IssueCategory::Vandalism]),
            technician(2, vec![IssueCategory::Pothole]),
            technician(3, vec![]),
            technician(4, vec![IssueCategory::Pothole, IssueCategory::RoadDamage]),
        ];

        let ids: Vec<_> = suited_first(&roster, Some(&IssueCategory::Pothole))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);

        let unchanged: Vec<_> = suited_first(&roster, None).iter().map(|t| t.id).collect();
        assert_eq!(unchanged, vec![1, 2, 3, 4]);
    }
}
