//! View data handed to the renderer. Each struct is serialized as-is in the response body.

use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::attachment::Model as AttachmentModel;
use crate::entity::comment::Model as CommentModel;
use crate::entity::issue::Model as IssueModel;
use crate::model::issue::NewIssue;

pub const DUPLICATE_WARNING: &str = "Similar issue already exists. Please search before adding.";

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardView {
    pub total: u64,
    pub todo: u64,
    pub inprogress: u64,
    pub done: u64,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct AddIssueView {
    pub error: Option<String>,
    /// Submitted values, echoed back when the form is redisplayed.
    pub form: Option<NewIssue>,
}

impl AddIssueView {
    pub fn duplicate(form: NewIssue) -> Self {
        Self {
            error: Some(DUPLICATE_WARNING.to_string()),
            form: Some(form),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssueListView {
    pub rows: Vec<IssueModel>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyIssuesView {
    pub rows: Vec<IssueModel>,
    pub bid: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssueDetailView {
    pub issue: IssueModel,
    pub comments: Vec<CommentModel>,
    pub attachments: Vec<AttachmentModel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoardView {
    pub todo: Vec<IssueModel>,
    pub inprogress: Vec<IssueModel>,
    pub done: Vec<IssueModel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchView {
    pub rows: Vec<IssueModel>,
    pub q: String,
}
