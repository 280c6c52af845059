//! Predicate builders for the issue list, search and duplicate check.
//!
//! Every criterion becomes a sea-query expression whose value is bound as a statement parameter;
//! user input never ends up in the SQL text.

use sea_orm::ColumnTrait;
use sea_query::Condition;

use crate::entity::issue::Column;
use crate::model::issue::IssueListQuery;

/// Number of leading characters of a description used by the duplicate heuristic.
pub const DUPLICATE_PREFIX_CHARS: usize = 20;

/// Equality criteria for the issue list. Absent criteria are not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Matched against the whole tags value, not against individual tags.
    pub tag: Option<String>,
}

impl IssueFilter {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(status) = &self.status {
            condition = condition.add(Column::Status.eq(status.as_str()));
        }
        if let Some(priority) = &self.priority {
            condition = condition.add(Column::Priority.eq(priority.as_str()));
        }
        if let Some(tag) = &self.tag {
            condition = condition.add(Column::Tags.eq(tag.as_str()));
        }
        condition
    }
}

impl From<IssueListQuery> for IssueFilter {
    // empty query parameters (`?status=`) count as absent
    fn from(query: IssueListQuery) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            status: non_empty(query.status),
            priority: non_empty(query.priority),
            tag: non_empty(query.tag),
        }
    }
}

fn contains_pattern(text: &str) -> String {
    format!("%{text}%")
}

/// Substring match across the six searchable text columns. An empty `text` matches every row.
pub fn search_condition(text: &str) -> Condition {
    let pattern = contains_pattern(text);
    Condition::any()
        .add(Column::Description.like(&pattern))
        .add(Column::Module.like(&pattern))
        .add(Column::Product.like(&pattern))
        .add(Column::SubModule.like(&pattern))
        .add(Column::Resolution.like(&pattern))
        .add(Column::Tags.like(&pattern))
}

/// Leading `DUPLICATE_PREFIX_CHARS` characters of `description` (fewer if it is shorter).
pub fn duplicate_prefix(description: &str) -> &str {
    match description.char_indices().nth(DUPLICATE_PREFIX_CHARS) {
        Some((end, _)) => &description[..end],
        None => description,
    }
}

/// Description or resolution contains the description's prefix.
///
/// LIKE metacharacters in the prefix are left as-is.
pub fn duplicate_condition(description: &str) -> Condition {
    let pattern = contains_pattern(duplicate_prefix(description));
    Condition::any()
        .add(Column::Description.like(&pattern))
        .add(Column::Resolution.like(&pattern))
}
