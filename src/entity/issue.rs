use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::issue::NewIssue;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "issues")]
#[schema(as = Issue)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sl_no: String,
    pub description: String,
    pub module: String,
    pub sub_module: String,
    pub product: String,
    pub resolution: String,
    pub status: String, // "To Do", "In Progress", "Done" by convention only
    pub priority: String,
    pub owner_browser_id: String,
    pub tags: String,
}

// comments/attachments reference issues without a declared foreign key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn from_new_issue(issue: NewIssue) -> Self {
        Self {
            sl_no: Set(issue.sl_no),
            description: Set(issue.description),
            module: Set(issue.module),
            sub_module: Set(issue.sub_module),
            product: Set(issue.product),
            resolution: Set(issue.resolution),
            status: Set(issue.status),
            priority: Set(issue.priority),
            owner_browser_id: Set(issue.owner_browser_id),
            tags: Set(issue.tags),
            ..Default::default()
        }
    }
}
