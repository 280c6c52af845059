use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::comment::{self, ActiveModel as CommentActiveModel, Entity as CommentEntity, Model as CommentModel};

/// Minute resolution, UTC, no zone suffix.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Appends a comment. The issue id is not checked, so comments on unknown issues are stored as-is.
pub async fn add<C: ConnectionTrait>(db: &C, issue_id: i32, text: &str) -> Result<CommentModel, DbErr> {
    let new_comment = CommentActiveModel {
        issue_id: Set(issue_id),
        comment: Set(text.to_string()),
        created_at: Set(Utc::now().format(CREATED_AT_FORMAT).to_string()),
        ..Default::default()
    };

    new_comment.insert(db).await
}

/// Newest first. Ordered by id because timestamps collide within the same minute.
pub async fn list<C: ConnectionTrait>(db: &C, issue_id: i32) -> Result<Vec<CommentModel>, DbErr> {
    CommentEntity::find()
        .filter(comment::Column::IssueId.eq(issue_id))
        .order_by_desc(comment::Column::Id)
        .all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use crate::repository::test_support::setup_db;

    #[tokio::test]
    async fn comments_list_newest_first() {
        let db = setup_db().await;
        let first = add(&db, 1, "Reproduced on staging").await.unwrap();
        let second = add(&db, 1, "Fix deployed").await.unwrap();
        add(&db, 2, "Other issue").await.unwrap();

        let comments = list(&db, 1).await.unwrap();
        assert_eq!(comments, vec![second, first]);
    }

    #[tokio::test]
    async fn created_at_has_minute_resolution() {
        let db = setup_db().await;
        let comment = add(&db, 1, "Timestamped").await.unwrap();

        assert_eq!(comment.created_at.len(), "2025-01-01 00:00".len());
        NaiveDateTime::parse_from_str(&comment.created_at, CREATED_AT_FORMAT).unwrap();
    }

    #[tokio::test]
    async fn comments_on_unknown_issues_are_accepted() {
        let db = setup_db().await;
        let orphan = add(&db, 404, "Nobody home").await.unwrap();

        assert_eq!(orphan.issue_id, 404);
        assert_eq!(list(&db, 404).await.unwrap(), vec![orphan]);
    }
}
