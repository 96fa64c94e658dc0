use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;

/// Pure visibility tag, no hierarchy.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}
