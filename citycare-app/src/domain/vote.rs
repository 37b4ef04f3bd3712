use super::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};

const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// A single voter's up/down flag with an optional comment.
///
/// Embedded in issues and returned by the comments endpoint; the author is
/// only present on the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default = "upvote_by_default", deserialize_with = "flag_or_upvote")]
    pub upvote: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub citizen: Option<Author>,
}

fn upvote_by_default() -> bool {
    true
}

fn flag_or_upvote<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

impl Vote {
    pub fn author_name(&self) -> &str {
        self.citizen
            .as_ref()
            .and_then(|author| author.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS)
    }

    pub fn comment_text(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Server-authoritative counts from `GET /api/votes/{id}/count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downvotes: u64,
}

/// Counts derived locally from an issue's embedded vote list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub upvotes: usize,
    pub downvotes: usize,
}

impl VoteTally {
    pub fn from_votes(votes: &[Vote]) -> Self {
        let upvotes = votes.iter().filter(|vote| vote.upvote).count();
        Self {
            upvotes,
            downvotes: votes.len() - upvotes,
        }
    }

    pub fn total(&self) -> usize {
        self.upvotes + self.downvotes
    }
}

/// The signed-in user's own vote on one issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MyVote {
    #[default]
    NoVote,
    Cast { upvote: bool, comment: String },
}

impl MyVote {
    pub fn upvote(&self) -> Option<bool> {
        match self {
            Self::NoVote => None,
            Self::Cast { upvote, .. } => Some(*upvote),
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Self::NoVote => "",
            Self::Cast { comment, .. } => comment,
        }
    }

    pub fn is_cast(&self) -> bool {
        matches!(self, Self::Cast { .. })
    }
}

impl From<Option<Vote>> for MyVote {
    fn from(vote: Option<Vote>) -> Self {
        match vote {
            Some(vote) => Self::Cast {
                upvote: vote.upvote,
                comment: vote.comment.unwrap_or_default(),
            },
            None => Self::NoVote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(upvote: bool) -> Vote {
        Vote {
            id: None,
            upvote,
            comment: None,
            citizen: None,
        }
    }

    #[test]
    fn test_tally_counts_flags() {
        let votes = vec![vote(true), vote(false), vote(true), vote(true)];
        let tally = VoteTally::from_votes(&votes);
        assert_eq!(tally.upvotes, 3);
        assert_eq!(tally.downvotes, 1);
        assert_eq!(tally.total(), votes.len());
    }

    #[test]
    fn test_null_flag_reads_as_upvote() {
        let vote: Vote = serde_json::from_str(r#"{"id": 1, "upvote": null}"#).unwrap();
        assert!(vote.upvote);
    }

    #[test]
    fn test_author_name_falls_back_to_anonymous() {
        let mut comment = vote(false);
        assert_eq!(comment.author_name(), "Anonymous");

        comment.citizen = Some(Author {
            id: Some(2),
            name: Some("Asha".to_string()),
        });
        assert_eq!(comment.author_name(), "Asha");
    }

    #[test]
    fn test_my_vote_from_backend_vote() {
        let cast = MyVote::from(Some(Vote {
            comment: Some("fix it".to_string()),
            ..vote(false)
        }));
        assert_eq!(cast.upvote(), Some(false));
        assert_eq!(cast.comment(), "fix it");
        assert_eq!(MyVote::from(None), MyVote::NoVote);
    }
}
