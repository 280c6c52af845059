//! Data access for issues, comments and attachments.
//!
//! Functions are generic over [`sea_orm::ConnectionTrait`] so the same call works on the pooled
//! connection or inside a transaction opened by the caller.

pub mod attachment;
pub mod comment;
pub mod issue;
