use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{DatabaseError, Enrollment};

use super::sqlstate;

// SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

pub struct EnrollmentRepository;

impl EnrollmentRepository {
    /// Create the one enrollment for this (account, course) pair. A second
    /// attempt hits the unique index and maps to `Duplicate`.
    pub async fn create_enrollment(
        pool: &PgPool,
        account_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, DatabaseError> {
        let result = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (account_id, course_id)
            VALUES ($1, $2)
            RETURNING id, account_id, course_id, enrolled_at
            "#,
        )
        .bind(account_id)
        .bind(course_id)
        .fetch_one(pool)
        .await;

        match result {
            Ok(enrollment) => Ok(enrollment),
            Err(err) if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(DatabaseError::Duplicate)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_enrollment(
        pool: &PgPool,
        account_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, DatabaseError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, account_id, course_id, enrolled_at
            FROM enrollments
            WHERE account_id = $1 AND course_id = $2
            "#,
        )
        .bind(account_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

        Ok(enrollment)
    }

    pub async fn list_enrollments(
        pool: &PgPool,
        account_id: Uuid,
    ) -> Result<Vec<Enrollment>, DatabaseError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, account_id, course_id, enrolled_at
            FROM enrollments
            WHERE account_id = $1
            ORDER BY enrolled_at, id
            "#,
        )
        .bind(account_id)
        .fetch_all(pool)
        .await?;

        Ok(enrollments)
    }
}
