use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{info, instrument};

use crate::configuration::DatabaseSettings;
use crate::migration::Migrator;

#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn init_db(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    info!("connecting to database");

    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(settings.sqlx_logging);

    let db = Database::connect(options).await?;
    info!("database connection established");

    Ok(db)
}

/// Creates the issues, comments and attachments tables when they are missing.
#[instrument(skip(db))]
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("schema is up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Statement};

    async fn table_names(db: &DatabaseConnection) -> Vec<String> {
        let rows = db
            .query_all(Statement::from_string(
                db.get_database_backend(),
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
            ))
            .await
            .unwrap();
        rows.iter()
            .map(|row| row.try_get::<String>("", "name").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn ensure_schema_creates_three_relations() {
        let db = init_db(&DatabaseSettings::in_memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();

        let names = table_names(&db).await;
        for table in ["issues", "comments", "attachments"] {
            assert!(names.iter().any(|n| n == table), "missing {table}: {names:?}");
        }
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let db = init_db(&DatabaseSettings::in_memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();
        ensure_schema(&db).await.unwrap();
    }

    #[tokio::test]
    async fn ensure_schema_accepts_tables_created_elsewhere() {
        let db = init_db(&DatabaseSettings::in_memory()).await.unwrap();
        db.execute_unprepared(
            "CREATE TABLE issues (id INTEGER PRIMARY KEY AUTOINCREMENT, sl_no TEXT, description TEXT, \
             module TEXT, sub_module TEXT, product TEXT, resolution TEXT, status TEXT, priority TEXT, \
             owner_browser_id TEXT, tags TEXT)",
        )
        .await
        .unwrap();

        ensure_schema(&db).await.unwrap();
        assert!(table_names(&db).await.iter().any(|n| n == "comments"));
    }

    #[tokio::test]
    async fn ensure_schema_fills_nulls_left_in_legacy_rows() {
        let db = init_db(&DatabaseSettings::in_memory()).await.unwrap();
        db.execute_unprepared(
            "CREATE TABLE issues (id INTEGER PRIMARY KEY AUTOINCREMENT, sl_no TEXT, description TEXT, \
             module TEXT, sub_module TEXT, product TEXT, resolution TEXT, status TEXT, priority TEXT, \
             owner_browser_id TEXT, tags TEXT)",
        )
        .await
        .unwrap();
        db.execute_unprepared(
            "CREATE TABLE comments (id INTEGER PRIMARY KEY AUTOINCREMENT, issue_id INTEGER, comment TEXT, \
             created_at TEXT)",
        )
        .await
        .unwrap();
        db.execute_unprepared("INSERT INTO issues (description, status) VALUES ('Legacy row', 'To Do')")
            .await
            .unwrap();
        db.execute_unprepared("INSERT INTO comments (issue_id, comment) VALUES (1, 'no timestamp')")
            .await
            .unwrap();

        ensure_schema(&db).await.unwrap();

        let issue = crate::repository::issue::get(&db, 1).await.unwrap().unwrap();
        assert_eq!(issue.description, "Legacy row");
        assert_eq!(issue.module, "");
        assert_eq!(issue.tags, "");

        let comments = crate::repository::comment::list(&db, 1).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].created_at, "");
    }
}
