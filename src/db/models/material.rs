use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "material_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Video,
    Pdf,
    Slides,
    Quiz,
    Other,
}

/// Belongs to exactly one course; the course reference is immutable after
/// creation.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub kind: MaterialKind,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
