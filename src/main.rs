use anyhow::Context;
use std::net::TcpListener;
use tracing::info;

use issue_board::configuration::get_configuration;
use issue_board::db::{ensure_schema, init_db};
use issue_board::startup::run;
use issue_board::storage::FileStore;
use issue_board::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("issue_board".into(), "info,sqlx=warn".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let settings = get_configuration()?;
    info!(?settings, "configuration loaded");

    let db = init_db(&settings.database)
        .await
        .context("failed to connect to the database")?;
    ensure_schema(&db).await.context("failed to create the schema")?;

    let store = FileStore::new(&settings.upload.dir).with_context(|| {
        format!("failed to create upload directory {}", settings.upload.dir.display())
    })?;

    let address = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&address).with_context(|| format!("failed to bind {address}"))?;
    info!("listening on http://{address}");

    run(listener, db, store, settings.upload.limit_bytes)?.await?;

    Ok(())
}
