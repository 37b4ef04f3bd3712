mod home;
mod login;
mod my_issues;
mod officer_issues;
mod officers;
mod profile;
mod public_issues;
mod report_issue;
mod signup;
mod technician_issues;
mod technicians;

pub use home::HomePage;
pub use login::LoginPage;
pub use my_issues::MyIssuesPage;
pub use officer_issues::OfficerIssuesPage;
pub use officers::OfficersPage;
pub use profile::ProfilePage;
pub use public_issues::PublicIssuesPage;
pub use report_issue::ReportIssuePage;
pub use signup::SignupPage;
pub use technician_issues::TechnicianIssuesPage;
pub use technicians::TechniciansPage;
