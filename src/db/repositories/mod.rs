mod account_repository;
mod category_repository;
mod course_repository;
mod enrollment_repository;
mod progress_repository;
mod rating_repository;

pub use account_repository::AccountRepository;
pub use category_repository::{CategoryRepository, PgCategoryIndex};
pub use course_repository::CourseRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use progress_repository::PgProgressStore;
pub use rating_repository::RatingRepository;

/// SQLSTATE of the underlying database error, when there is one.
pub(crate) fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.to_string()),
        _ => None,
    }
}
