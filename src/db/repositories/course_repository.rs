use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{Course, DatabaseError, Material};

pub struct CourseRepository;

impl CourseRepository {
    pub async fn list_courses(pool: &PgPool) -> Result<Vec<Course>, DatabaseError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, teacher_id, title, description, created_at, updated_at
            FROM courses
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    pub async fn get_course(pool: &PgPool, course_id: Uuid) -> Result<Option<Course>, DatabaseError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, teacher_id, title, description, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

        Ok(course)
    }

    pub async fn list_materials(
        pool: &PgPool,
        course_id: Uuid,
    ) -> Result<Vec<Material>, DatabaseError> {
        let materials = sqlx::query_as::<_, Material>(
            r#"
            SELECT id, course_id, title, kind, created_at, updated_at
            FROM materials
            WHERE course_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        Ok(materials)
    }

    pub async fn get_material(
        pool: &PgPool,
        material_id: Uuid,
    ) -> Result<Option<Material>, DatabaseError> {
        let material = sqlx::query_as::<_, Material>(
            r#"
            SELECT id, course_id, title, kind, created_at, updated_at
            FROM materials
            WHERE id = $1
            "#,
        )
        .bind(material_id)
        .fetch_optional(pool)
        .await?;

        Ok(material)
    }
}
