use std::collections::HashSet;

use uuid::Uuid;

use super::{CourseProgress, ProgressError, ProgressStore, ProgressSummary};

/// Integer round-half-up of `numerator / denominator`. Used for every
/// percentage in this module so a ratio never rounds two different ways in
/// two places.
fn round_div(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

/// Completion statistics for one enrolled course.
///
/// Materials with no progress row count as not started. Progress rows whose
/// material has since been deleted are ignored on both sides of the ratio.
/// A course with zero materials reports 0%, never 100%.
pub async fn course_progress(
    store: &dyn ProgressStore,
    account_id: Uuid,
    course_id: Uuid,
) -> Result<CourseProgress, ProgressError> {
    if store.get_course(course_id).await?.is_none() {
        return Err(ProgressError::MissingCourse(course_id));
    }

    let materials = store.list_materials(course_id).await?;
    let material_ids: HashSet<Uuid> = materials.iter().map(|m| m.id).collect();

    let completed = store
        .list_progress(account_id, course_id)
        .await?
        .iter()
        .filter(|p| p.completed && material_ids.contains(&p.material_id))
        .count() as u32;

    let total = materials.len() as u32;
    let percentage = if total > 0 {
        round_div(100 * u64::from(completed), u64::from(total)) as u8
    } else {
        0
    };

    Ok(CourseProgress {
        course_id,
        total_materials: total,
        completed_materials: completed,
        completion_percentage: percentage,
    })
}

/// Overall completion statistics across all of an account's enrollments.
///
/// A course counts as completed only at 100% with at least one material.
/// The average is the round-half-up mean of the per-course percentages and
/// is 0 (not an error) when there are no enrollments.
pub async fn progress_summary(
    store: &dyn ProgressStore,
    account_id: Uuid,
) -> Result<ProgressSummary, ProgressError> {
    let enrollments = store.list_enrollments(account_id).await?;

    let mut summary = ProgressSummary {
        total_courses: enrollments.len() as u32,
        completed_courses: 0,
        total_materials: 0,
        completed_materials: 0,
        average_completion: 0,
    };
    if enrollments.is_empty() {
        return Ok(summary);
    }

    let mut percentage_sum: u64 = 0;
    for enrollment in &enrollments {
        let progress = course_progress(store, account_id, enrollment.course_id).await?;
        summary.total_materials += progress.total_materials;
        summary.completed_materials += progress.completed_materials;
        if progress.completion_percentage == 100 && progress.total_materials > 0 {
            summary.completed_courses += 1;
        }
        percentage_sum += u64::from(progress.completion_percentage);
    }

    summary.average_completion = round_div(percentage_sum, enrollments.len() as u64) as u8;
    Ok(summary)
}
