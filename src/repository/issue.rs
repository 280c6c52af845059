use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use sea_query::Expr;
use tracing::{info, instrument};

use crate::entity::issue::{self, ActiveModel as IssueActiveModel, Entity as IssueEntity, Model as IssueModel};
use crate::model::issue::{CreateOutcome, IssueStatus, NewIssue};
use crate::query::{duplicate_condition, search_condition, IssueFilter};

pub async fn count_all<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    IssueEntity::find().count(db).await
}

pub async fn count_by_status<C: ConnectionTrait>(db: &C, status: IssueStatus) -> Result<u64, DbErr> {
    IssueEntity::find()
        .filter(issue::Column::Status.eq(status.as_str()))
        .count(db)
        .await
}

/// Lowest-id issue whose description or resolution contains the first 20 characters of
/// `description`.
pub async fn find_duplicate<C: ConnectionTrait>(
    db: &C,
    description: &str,
) -> Result<Option<IssueModel>, DbErr> {
    IssueEntity::find()
        .filter(duplicate_condition(description))
        .order_by_asc(issue::Column::Id)
        .one(db)
        .await
}

/// Inserts `new_issue` unless the duplicate heuristic finds an existing match.
///
/// The check and the insert are separate statements; callers that need them to be atomic have to
/// pass a transaction.
#[instrument(skip(db, new_issue), fields(owner = %new_issue.owner_browser_id))]
pub async fn create<C: ConnectionTrait>(db: &C, new_issue: NewIssue) -> Result<CreateOutcome, DbErr> {
    if let Some(existing) = find_duplicate(db, &new_issue.description).await? {
        info!(duplicate_of = existing.id, "issue creation refused as duplicate");
        return Ok(CreateOutcome::Duplicate(existing));
    }

    let inserted = IssueActiveModel::from_new_issue(new_issue).insert(db).await?;
    info!(issue_id = inserted.id, "issue created");

    Ok(CreateOutcome::Created(inserted))
}

pub async fn list<C: ConnectionTrait>(db: &C, filter: &IssueFilter) -> Result<Vec<IssueModel>, DbErr> {
    IssueEntity::find()
        .filter(filter.condition())
        .order_by_desc(issue::Column::Id)
        .all(db)
        .await
}

pub async fn list_by_owner<C: ConnectionTrait>(db: &C, owner_id: &str) -> Result<Vec<IssueModel>, DbErr> {
    IssueEntity::find()
        .filter(issue::Column::OwnerBrowserId.eq(owner_id))
        .order_by_desc(issue::Column::Id)
        .all(db)
        .await
}

pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<IssueModel>, DbErr> {
    IssueEntity::find_by_id(id).one(db).await
}

/// Overwrites the status unconditionally. Returns `false` when no issue has `id`.
#[instrument(skip(db))]
pub async fn update_status<C: ConnectionTrait>(db: &C, id: i32, new_status: &str) -> Result<bool, DbErr> {
    let result = IssueEntity::update_many()
        .col_expr(issue::Column::Status, Expr::value(new_status))
        .filter(issue::Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

pub async fn search<C: ConnectionTrait>(db: &C, text: &str) -> Result<Vec<IssueModel>, DbErr> {
    IssueEntity::find()
        .filter(search_condition(text))
        .order_by_desc(issue::Column::Id)
        .all(db)
        .await
}
