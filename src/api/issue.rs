use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument, warn};

use crate::api::attachment::store_upload;
use crate::api::redirect;
use crate::model::global_error::{AppError, ErrorCode};
use crate::model::issue::{
    CreateOutcome, IssueCreateForm, IssueListQuery, IssueStatus, MyIssuesQuery, SearchQuery,
};
use crate::model::view::{
    AddIssueView, BoardView, DashboardView, IssueDetailView, IssueListView, MyIssuesView, SearchView,
};
use crate::query::IssueFilter;
use crate::repository::{attachment as attachment_repo, comment as comment_repo, issue as issue_repo};
use crate::storage::FileStore;

async fn dashboard_view(db: &DatabaseConnection) -> Result<DashboardView, AppError> {
    Ok(DashboardView {
        total: issue_repo::count_all(db).await?,
        todo: issue_repo::count_by_status(db, IssueStatus::ToDo).await?,
        inprogress: issue_repo::count_by_status(db, IssueStatus::InProgress).await?,
        done: issue_repo::count_by_status(db, IssueStatus::Done).await?,
    })
}

#[utoipa::path(
    get,
    path = "/",
    summary = "Dashboard counts",
    responses(
        (status = 200, description = "Issue totals per known status", body = DashboardView),
    ),
    tag = "issues",
)]
#[get("/")]
pub async fn index(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(dashboard_view(db.get_ref()).await?))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    summary = "Dashboard counts",
    responses(
        (status = 200, description = "Issue totals per known status", body = DashboardView),
    ),
    tag = "issues",
)]
#[get("/dashboard")]
pub async fn dashboard(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(dashboard_view(db.get_ref()).await?))
}

#[utoipa::path(
    get,
    path = "/add",
    summary = "Empty issue creation form",
    responses(
        (status = 200, description = "Form view", body = AddIssueView),
    ),
    tag = "issues",
)]
#[get("/add")]
pub async fn add_form() -> HttpResponse {
    HttpResponse::Ok().json(AddIssueView::default())
}

#[utoipa::path(
    post,
    path = "/add",
    summary = "Create an issue, optionally with an attachment",
    responses(
        (status = 302, description = "Created, redirects to the board"),
        (status = 200, description = "Duplicate found, form redisplayed with a warning", body = AddIssueView),
        (status = 400, description = "Missing required field"),
    ),
    tag = "issues",
)]
#[post("/add")]
#[instrument(skip_all)]
pub async fn add_issue(
    db: web::Data<DatabaseConnection>,
    store: web::Data<FileStore>,
    MultipartForm(form): MultipartForm<IssueCreateForm>,
) -> Result<HttpResponse, AppError> {
    let (new_issue, upload) = form.into_parts();

    // duplicate check, insert and attachment record commit together
    let txn = db.begin().await?;

    let issue = match issue_repo::create(&txn, new_issue.clone()).await? {
        CreateOutcome::Created(issue) => issue,
        CreateOutcome::Duplicate(_) => {
            txn.rollback().await?;
            return Ok(HttpResponse::Ok().json(AddIssueView::duplicate(new_issue)));
        }
    };

    if let Some(upload) = upload {
        store_upload(&txn, store.get_ref(), issue.id, &upload).await?;
    }

    txn.commit().await?;

    Ok(redirect("/board"))
}

#[utoipa::path(
    get,
    path = "/issues",
    summary = "Issue list filtered by status, priority and tag",
    params(IssueListQuery),
    responses(
        (status = 200, description = "Matching issues, newest first", body = IssueListView),
    ),
    tag = "issues",
)]
#[get("/issues")]
pub async fn list_issues(
    db: web::Data<DatabaseConnection>,
    query: web::Query<IssueListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let IssueListQuery { status, priority, tag } = query.clone();

    let rows = issue_repo::list(db.get_ref(), &IssueFilter::from(query)).await?;

    Ok(HttpResponse::Ok().json(IssueListView { rows, status, priority, tag }))
}

#[utoipa::path(
    get,
    path = "/my",
    summary = "Issues submitted by one browser",
    params(MyIssuesQuery),
    responses(
        (status = 200, description = "Owner's issues, newest first", body = MyIssuesView),
        (status = 400, description = "Browser ID missing"),
    ),
    tag = "issues",
)]
#[get("/my")]
pub async fn my_issues(
    db: web::Data<DatabaseConnection>,
    query: web::Query<MyIssuesQuery>,
) -> Result<HttpResponse, AppError> {
    let bid = query
        .into_inner()
        .bid
        .filter(|bid| !bid.is_empty())
        .ok_or_else(|| AppError::bad_request(ErrorCode::MissingBrowserId))?;

    let rows = issue_repo::list_by_owner(db.get_ref(), &bid).await?;

    Ok(HttpResponse::Ok().json(MyIssuesView { rows, bid }))
}

#[utoipa::path(
    get,
    path = "/issue/{id}",
    summary = "Issue with its comments and attachments",
    params(
        ("id" = i32, Path, description = "Issue id"),
    ),
    responses(
        (status = 200, description = "Issue detail", body = IssueDetailView),
        (status = 404, description = "Unknown issue"),
    ),
    tag = "issues",
)]
#[get("/issue/{id}")]
pub async fn issue_details(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let issue_id = path.into_inner();

    let issue = issue_repo::get(db.get_ref(), issue_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::IssueNotFound))?;
    let comments = comment_repo::list(db.get_ref(), issue_id).await?;
    let attachments = attachment_repo::list(db.get_ref(), issue_id).await?;

    Ok(HttpResponse::Ok().json(IssueDetailView {
        issue,
        comments,
        attachments,
    }))
}

#[utoipa::path(
    get,
    path = "/board",
    summary = "Kanban board",
    responses(
        (status = 200, description = "Issues grouped into the three status columns", body = BoardView),
    ),
    tag = "issues",
)]
#[get("/board")]
pub async fn board(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let db = db.get_ref();

    let todo = issue_repo::list(db, &IssueFilter::with_status(IssueStatus::ToDo.as_str())).await?;
    let inprogress = issue_repo::list(db, &IssueFilter::with_status(IssueStatus::InProgress.as_str())).await?;
    let done = issue_repo::list(db, &IssueFilter::with_status(IssueStatus::Done.as_str())).await?;

    Ok(HttpResponse::Ok().json(BoardView { todo, inprogress, done }))
}

// Reachable with GET, so link prefetchers and crawlers can move cards too.
#[utoipa::path(
    get,
    path = "/move/{id}/{new_status}",
    summary = "Move a card to another status",
    params(
        ("id" = i32, Path, description = "Issue id"),
        ("new_status" = String, Path, description = "Status to store, written as-is"),
    ),
    responses(
        (status = 302, description = "Redirects to the board"),
    ),
    tag = "issues",
)]
#[get("/move/{id}/{new_status}")]
#[instrument(skip(db))]
pub async fn move_issue(
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, String)>,
) -> Result<HttpResponse, AppError> {
    let (issue_id, new_status) = path.into_inner();

    if issue_repo::update_status(db.get_ref(), issue_id, &new_status).await? {
        let on_board = IssueStatus::parse(&new_status).is_some();
        info!(issue_id, new_status = %new_status, on_board, "issue moved");
    } else {
        warn!(issue_id, "move requested for unknown issue");
    }

    Ok(redirect("/board"))
}

#[utoipa::path(
    get,
    path = "/search",
    summary = "Substring search across the text fields",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching issues, newest first", body = SearchView),
    ),
    tag = "issues",
)]
#[get("/search")]
pub async fn search_issues(
    db: web::Data<DatabaseConnection>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let SearchQuery { q } = query.into_inner();

    let rows = issue_repo::search(db.get_ref(), &q).await?;

    Ok(HttpResponse::Ok().json(SearchView { rows, q }))
}
