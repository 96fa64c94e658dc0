use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

/// Unique per (account, course); a second submission updates the existing
/// row rather than adding another.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CourseRating {
    pub id: Uuid,
    pub account_id: Uuid,
    pub course_id: Uuid,
    pub rating: i16,
    pub review: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCourseRating {
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    pub review: Option<String>,
}
