mod issue;
mod profile;
mod roster;
mod session;
mod vote;

pub use issue::{Address, AddressField, Attachment, Issue, IssueCategory, IssueId, IssueStatus, NewIssue};
pub use profile::{CitizenProfile, ContactDetails, PasswordChange, ProfileUpdate, StaffProfile};
pub use roster::{suited_first, NewOfficer, NewTechnician, Officer, RosterEntry, Technician};
pub use session::{AuthResponse, LoginRequest, OtpRequest, Role, SessionContext, SignupRequest};
pub use vote::{Author, MyVote, Vote, VoteCounts, VoteTally};

use serde::{Deserialize, Deserializer};

/// The backend serializes absent collections and strings as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
