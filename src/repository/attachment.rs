use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::attachment::{self, ActiveModel as AttachmentActiveModel, Entity as AttachmentEntity, Model as AttachmentModel};

/// Records an uploaded file against an issue. The bytes are written by [`crate::storage::FileStore`].
pub async fn record<C: ConnectionTrait>(db: &C, issue_id: i32, filename: &str) -> Result<AttachmentModel, DbErr> {
    let new_attachment = AttachmentActiveModel {
        issue_id: Set(issue_id),
        filename: Set(filename.to_string()),
        ..Default::default()
    };

    new_attachment.insert(db).await
}

pub async fn list<C: ConnectionTrait>(db: &C, issue_id: i32) -> Result<Vec<AttachmentModel>, DbErr> {
    AttachmentEntity::find()
        .filter(attachment::Column::IssueId.eq(issue_id))
        .order_by_asc(attachment::Column::Id)
        .all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::setup_db;

    #[tokio::test]
    async fn repeated_filenames_keep_separate_rows() {
        let db = setup_db().await;
        let first = record(&db, 3, "screenshot.png").await.unwrap();
        let second = record(&db, 3, "screenshot.png").await.unwrap();
        record(&db, 4, "other.log").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(list(&db, 3).await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn attachments_on_unknown_issues_are_accepted() {
        let db = setup_db().await;
        let orphan = record(&db, 999, "ghost.txt").await.unwrap();
        assert_eq!(list(&db, 999).await.unwrap(), vec![orphan]);
    }
}
