use sea_orm::ConnectionTrait;
use sea_orm_migration::prelude::*;

const ISSUE_TEXT_COLUMNS: [&str; 10] = [
    "sl_no",
    "description",
    "module",
    "sub_module",
    "product",
    "resolution",
    "status",
    "priority",
    "owner_browser_id",
    "tags",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    // Tables created outside this schema allow NULL in every column; rows must decode as NOT NULL.
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let assignments = ISSUE_TEXT_COLUMNS
            .iter()
            .map(|column| format!("{column} = COALESCE({column}, '')"))
            .collect::<Vec<_>>()
            .join(", ");
        db.execute_unprepared(&format!("UPDATE issues SET {assignments}"))
            .await?;

        db.execute_unprepared(
            "UPDATE comments SET issue_id = COALESCE(issue_id, 0), \
             comment = COALESCE(comment, ''), created_at = COALESCE(created_at, '')",
        )
        .await?;

        db.execute_unprepared(
            "UPDATE attachments SET issue_id = COALESCE(issue_id, 0), filename = COALESCE(filename, '')",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}
