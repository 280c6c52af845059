use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes as UploadedBytes;
use actix_multipart::form::text::Text;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

use crate::entity::issue::Model as IssueModel;

/// The three statuses the board and dashboard know about.
///
/// The status column itself is free text; values outside this set are stored and listed but never
/// counted or placed in a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueStatus {
    ToDo,
    InProgress,
    Done,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [IssueStatus::ToDo, IssueStatus::InProgress, IssueStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::ToDo => "To Do",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields of an issue that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewIssue {
    pub sl_no: String,
    pub description: String,
    pub module: String,
    pub sub_module: String,
    pub product: String,
    pub resolution: String,
    pub status: String,
    pub priority: String,
    pub owner_browser_id: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(IssueModel),
    /// An existing issue already matched the duplicate heuristic; nothing was inserted.
    Duplicate(IssueModel),
}

#[derive(MultipartForm)]
pub struct IssueCreateForm {
    pub sl_no: Text<String>,
    pub description: Text<String>,
    pub module: Text<String>,
    pub sub_module: Text<String>,
    pub product: Text<String>,
    pub resolution: Text<String>,
    pub status: Text<String>,
    pub priority: Text<String>,
    pub owner_browser_id: Text<String>,
    pub tags: Option<Text<String>>,
    pub file: Option<UploadedBytes>,
}

impl IssueCreateForm {
    pub fn into_parts(self) -> (NewIssue, Option<UploadedBytes>) {
        let issue = NewIssue {
            sl_no: self.sl_no.into_inner(),
            description: self.description.into_inner(),
            module: self.module.into_inner(),
            sub_module: self.sub_module.into_inner(),
            product: self.product.into_inner(),
            resolution: self.resolution.into_inner(),
            status: self.status.into_inner(),
            priority: self.priority.into_inner(),
            owner_browser_id: self.owner_browser_id.into_inner(),
            tags: self.tags.map(Text::into_inner).unwrap_or_default(),
        };
        (issue, self.file)
    }
}

#[derive(MultipartForm)]
pub struct UploadForm {
    pub file: Option<UploadedBytes>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentForm {
    pub comment: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IssueListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyIssuesQuery {
    /// Owner browser identifier.
    pub bid: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip_through_labels() {
        for status in IssueStatus::ALL {
            assert_eq!(IssueStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_labels_are_not_parsed() {
        assert_eq!(IssueStatus::parse("Blocked"), None);
        assert_eq!(IssueStatus::parse("done"), None);
        assert_eq!(IssueStatus::parse(""), None);
    }
}
