mod address_book;
mod error_display;
mod issue_card;
mod loading_spinner;
mod navbar;
mod notice;
mod password_form;
mod profile_editor;
mod require_role;
mod status_buttons;
mod text_field;
mod vote_section;

pub use address_book::AddressBook;
pub use error_display::{ErrorDisplay, StoreError};
pub use issue_card::IssueCard;
pub use loading_spinner::LoadingSpinner;
pub use navbar::{role_links, Navbar};
pub use notice::{FieldError, Notice};
pub use password_form::PasswordForm;
pub use profile_editor::ProfileEditor;
pub use require_role::RequireRole;
pub use status_buttons::StatusButtons;
pub use text_field::{TextArea, TextField};
pub use vote_section::VoteSection;
