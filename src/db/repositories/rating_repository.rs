use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{CourseRating, DatabaseError, NewCourseRating};

pub struct RatingRepository;

impl RatingRepository {
    /// One rating per (account, course); a second submission overwrites the
    /// first, refreshing `updated_at` and keeping `created_at`.
    pub async fn upsert_rating(
        pool: &PgPool,
        account_id: Uuid,
        course_id: Uuid,
        new_rating: &NewCourseRating,
    ) -> Result<CourseRating, DatabaseError> {
        let rating = sqlx::query_as::<_, CourseRating>(
            r#"
            INSERT INTO course_ratings (account_id, course_id, rating, review)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (account_id, course_id) DO UPDATE
            SET rating = EXCLUDED.rating,
                review = EXCLUDED.review,
                updated_at = NOW()
            RETURNING id, account_id, course_id, rating, review, created_at, updated_at
            "#,
        )
        .bind(account_id)
        .bind(course_id)
        .bind(new_rating.rating)
        .bind(new_rating.review.as_deref())
        .fetch_one(pool)
        .await?;

        Ok(rating)
    }
}
