mod checks;
mod finding;
mod report;
mod schemas;
mod validator;


pub use checks::{Check, CheckContext, is_absolute_uri};
pub use finding::{Finding, Findings, Severity};
pub use report::ValidationReport;
// Re-export the main Validator
pub use validator::Validator;
