use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes as UploadedBytes;
use actix_web::{post, web, HttpResponse};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{debug, info, instrument, warn};

use crate::api::redirect;
use crate::entity::attachment::Model as AttachmentModel;
use crate::model::global_error::AppError;
use crate::model::issue::UploadForm;
use crate::repository::attachment as attachment_repo;
use crate::storage::{secure_filename, FileStore};

/// Writes the upload to the file store, then records it against `issue_id`.
///
/// Uploads without a filename, or whose name sanitizes to nothing, are skipped. If recording
/// fails after the write, the file stays on disk.
pub(crate) async fn store_upload<C: ConnectionTrait>(
    db: &C,
    store: &FileStore,
    issue_id: i32,
    upload: &UploadedBytes,
) -> Result<Option<AttachmentModel>, AppError> {
    let Some(original_name) = upload.file_name.as_deref().filter(|name| !name.is_empty()) else {
        return Ok(None);
    };

    let filename = secure_filename(original_name);
    if filename.is_empty() {
        warn!(original_name, "upload filename sanitized to nothing, skipping");
        return Ok(None);
    }

    store.save(&filename, &upload.data).await?;
    let attachment = attachment_repo::record(db, issue_id, &filename).await?;
    info!(attachment_id = attachment.id, issue_id, filename = %filename, "attachment stored");

    Ok(Some(attachment))
}

#[utoipa::path(
    post,
    path = "/upload/{id}",
    summary = "Attach a file to an existing issue",
    params(
        ("id" = i32, Path, description = "Issue id, not checked for existence"),
    ),
    responses(
        (status = 302, description = "Redirects to the issue detail view, also when no file was sent"),
    ),
    tag = "attachments",
)]
#[post("/upload/{id}")]
#[instrument(skip_all)]
pub async fn upload_file(
    db: web::Data<DatabaseConnection>,
    store: web::Data<FileStore>,
    path: web::Path<i32>,
    form: Result<MultipartForm<UploadForm>, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    let issue_id = path.into_inner();

    // a body without a readable file part is treated as no upload
    let upload = match form {
        Ok(MultipartForm(form)) => form.file,
        Err(err) => {
            debug!(issue_id, error = %err, "no multipart file in upload request");
            None
        }
    };

    if let Some(upload) = upload {
        store_upload(db.get_ref(), store.get_ref(), issue_id, &upload).await?;
    }

    Ok(redirect(&format!("/issue/{issue_id}")))
}
