use actix_web::{post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use crate::api::redirect;
use crate::model::global_error::AppError;
use crate::model::issue::CommentForm;
use crate::repository::comment as comment_repo;

#[utoipa::path(
    post,
    path = "/add_comment/{id}",
    summary = "Append a comment to an issue",
    params(
        ("id" = i32, Path, description = "Issue id, not checked for existence"),
    ),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirects to the issue detail view"),
        (status = 400, description = "Missing comment field"),
    ),
    tag = "comments",
)]
#[post("/add_comment/{id}")]
#[instrument(skip(db, form))]
pub async fn add_comment(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, AppError> {
    let issue_id = path.into_inner();

    let comment = comment_repo::add(db.get_ref(), issue_id, &form.comment).await?;
    info!(comment_id = comment.id, issue_id, "comment added");

    Ok(redirect(&format!("/issue/{issue_id}")))
}
