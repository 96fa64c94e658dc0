use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{Course, DatabaseError, Enrollment, Material, ProgressRecord, ProgressUpdate};
use crate::progress::ProgressStore;

use super::{CourseRepository, EnrollmentRepository};

/// Progress store backed by the `enrollments`, `materials`, and
/// `progress_records` tables.
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressStore for PgProgressStore {
    async fn list_enrollments(&self, account_id: Uuid) -> Result<Vec<Enrollment>, DatabaseError> {
        EnrollmentRepository::list_enrollments(&self.pool, account_id).await
    }

    async fn get_course(&self, course_id: Uuid) -> Result<Option<Course>, DatabaseError> {
        CourseRepository::get_course(&self.pool, course_id).await
    }

    async fn list_materials(&self, course_id: Uuid) -> Result<Vec<Material>, DatabaseError> {
        CourseRepository::list_materials(&self.pool, course_id).await
    }

    async fn list_progress(
        &self,
        account_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<ProgressRecord>, DatabaseError> {
        let records = sqlx::query_as::<_, ProgressRecord>(
            r#"
            SELECT id, account_id, course_id, material_id, completed, completed_at,
                   created_at, updated_at
            FROM progress_records
            WHERE account_id = $1 AND course_id = $2
            "#,
        )
        .bind(account_id)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Idempotent under retry: the unique key on
    /// (account_id, course_id, material_id) means a resubmitted completion
    /// updates the existing row instead of adding one. `completed_at`
    /// keeps its first value across repeated completions.
    async fn upsert_progress(
        &self,
        update: ProgressUpdate,
    ) -> Result<ProgressRecord, DatabaseError> {
        let record = sqlx::query_as::<_, ProgressRecord>(
            r#"
            INSERT INTO progress_records (account_id, course_id, material_id, completed, completed_at)
            VALUES ($1, $2, $3, $4, CASE WHEN $4 THEN NOW() END)
            ON CONFLICT (account_id, course_id, material_id) DO UPDATE
            SET completed = EXCLUDED.completed,
                completed_at = CASE
                    WHEN EXCLUDED.completed THEN COALESCE(progress_records.completed_at, NOW())
                END,
                updated_at = NOW()
            RETURNING id, account_id, course_id, material_id, completed, completed_at,
                      created_at, updated_at
            "#,
        )
        .bind(update.account_id)
        .bind(update.course_id)
        .bind(update.material_id)
        .bind(update.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
