//! Progress core: turns enrollment, material, and completion records into
//! per-course and per-account statistics.
//!
//! Independent of access control; it operates over one account's (already
//! access-checked) enrollments.

mod aggregator;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{Course, DatabaseError, Enrollment, Material, ProgressRecord, ProgressUpdate};

pub use aggregator::{course_progress, progress_summary};

/// Storage reads the aggregator depends on, plus the single write path of
/// this core (the idempotent completion upsert).
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn list_enrollments(&self, account_id: Uuid) -> Result<Vec<Enrollment>, DatabaseError>;
    async fn get_course(&self, course_id: Uuid) -> Result<Option<Course>, DatabaseError>;
    async fn list_materials(&self, course_id: Uuid) -> Result<Vec<Material>, DatabaseError>;
    async fn list_progress(
        &self,
        account_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<ProgressRecord>, DatabaseError>;
    async fn upsert_progress(
        &self,
        update: ProgressUpdate,
    ) -> Result<ProgressRecord, DatabaseError>;
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CourseProgress {
    pub course_id: Uuid,
    pub total_materials: u32,
    pub completed_materials: u32,
    /// Rounded half-up to the nearest integer point; 0 for courses with no
    /// materials, never 100.
    pub completion_percentage: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total_courses: u32,
    pub completed_courses: u32,
    pub total_materials: u32,
    pub completed_materials: u32,
    /// Rounded half-up mean of the per-course percentages; 0 with no
    /// enrollments.
    pub average_completion: u8,
}

#[derive(Debug, Error)]
pub enum ProgressError {
    /// An enrollment references a course that no longer exists. Surfaced,
    /// never skipped: skipping would mask a data-integrity problem.
    #[error("course {0} referenced by an enrollment does not exist")]
    MissingCourse(Uuid),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}
