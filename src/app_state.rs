use std::sync::Arc;

use sqlx::PgPool;

use crate::access::{AccessPolicy, CategoryIndex};
use crate::config::Config;
use crate::db::{PgCategoryIndex, PgProgressStore};
use crate::progress::ProgressStore;

/// Shared per-process state. The category index and progress store are held
/// as trait objects, constructed once here: handlers never reach for a
/// storage singleton, and tests swap in in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: Config,
    pub policy: AccessPolicy,
    pub category_index: Arc<dyn CategoryIndex>,
    pub progress_store: Arc<dyn ProgressStore>,
}

impl AppState {
    pub fn new(db: PgPool, env: Config) -> Self {
        let policy = AccessPolicy {
            teacher_own_courses_only: env.access.teacher_own_courses_only,
        };
        Self {
            category_index: Arc::new(PgCategoryIndex::new(db.clone())),
            progress_store: Arc::new(PgProgressStore::new(db.clone())),
            db,
            env,
            policy,
        }
    }
}
