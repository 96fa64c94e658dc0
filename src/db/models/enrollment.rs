use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// One row per (account, course) pair, enforced by a unique index.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub account_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: OffsetDateTime,
}
