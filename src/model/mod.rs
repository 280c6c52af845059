pub mod global_error;
pub mod issue;
pub mod view;

pub use global_error::{AppError, ErrorCode};
pub use issue::{CreateOutcome, IssueStatus, NewIssue};
