use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// A course with no rows in `course_categories` is public: visible to every
/// account regardless of the account's own categories.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
