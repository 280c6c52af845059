use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use sea_orm::DatabaseConnection;
use std::net::TcpListener;

use crate::api;
use crate::model::global_error::{AppError, ErrorCode};
use crate::storage::FileStore;

const FORM_LIMIT_BYTES: usize = 1024 * 1024;

/// Extractor limits plus every route. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig, upload_limit: Option<usize>) {
    let upload_limit = upload_limit.unwrap_or(usize::MAX);

    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_LIMIT_BYTES)
            .error_handler(|err, _req| {
                AppError::with_detail(ErrorCode::ValidationError, err.to_string()).into()
            }),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::with_detail(ErrorCode::ValidationError, err.to_string()).into()
    }))
    .app_data(
        MultipartFormConfig::default()
            .total_limit(upload_limit)
            .memory_limit(upload_limit)
            .error_handler(|err, _req| {
                AppError::with_detail(ErrorCode::ValidationError, err.to_string()).into()
            }),
    )
    .service(api::health_check::health_check)
    .service(api::openapi_json)
    .service(api::index)
    .service(api::dashboard)
    .service(api::add_form)
    .service(api::add_issue)
    .service(api::list_issues)
    .service(api::my_issues)
    .service(api::issue_details)
    .service(api::add_comment)
    .service(api::upload_file)
    .service(api::board)
    .service(api::move_issue)
    .service(api::search_issues);
}

pub fn run(
    listener: TcpListener,
    db: DatabaseConnection,
    store: FileStore,
    upload_limit: Option<usize>,
) -> std::io::Result<Server> {
    let db_data = Data::new(db);
    let store_data = Data::new(store);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(store_data.clone())
            .configure(|cfg| configure(cfg, upload_limit))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
