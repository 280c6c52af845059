use actix_web::{get, HttpResponse};
use utoipa::OpenApi;

use crate::model::issue::{CommentForm, NewIssue};
use crate::model::view::{
    AddIssueView, BoardView, DashboardView, IssueDetailView, IssueListView, MyIssuesView, SearchView,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health_check::health_check,
        crate::api::issue::index,
        crate::api::issue::dashboard,
        crate::api::issue::add_form,
        crate::api::issue::add_issue,
        crate::api::issue::list_issues,
        crate::api::issue::my_issues,
        crate::api::issue::issue_details,
        crate::api::issue::board,
        crate::api::issue::move_issue,
        crate::api::issue::search_issues,
        crate::api::comment::add_comment,
        crate::api::attachment::upload_file,
    ),
    components(schemas(
        NewIssue,
        CommentForm,
        AddIssueView,
        BoardView,
        DashboardView,
        IssueDetailView,
        IssueListView,
        MyIssuesView,
        SearchView,
    )),
    tags(
        (name = "issues", description = "Issue creation, listing, board and search"),
        (name = "comments", description = "Issue comments"),
        (name = "attachments", description = "Issue attachments"),
    ),
)]
pub struct ApiDoc;

#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
