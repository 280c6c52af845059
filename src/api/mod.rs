use actix_web::HttpResponse;
use actix_web::http::header;

pub mod attachment;
pub mod comment;
pub mod doc;
pub mod health_check;
pub mod issue;

pub use crate::api::attachment::upload_file;
pub use crate::api::comment::add_comment;
pub use crate::api::doc::openapi_json;
pub use crate::api::issue::{
    add_form, add_issue, board, dashboard, index, issue_details, list_issues, move_issue, my_issues,
    search_issues,
};

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
