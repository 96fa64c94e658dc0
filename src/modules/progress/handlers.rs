use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::access::Principal;
use crate::app_state::AppState;
use crate::db::{
    AccountRepository, CompleteMaterial, CourseRepository, EnrollmentRepository, ProgressRecord,
    ProgressUpdate, Role,
};
use crate::error::{AppError, AppResult};
use crate::progress::{course_progress, progress_summary, CourseProgress, ProgressSummary};

/// Record a completion signal for one material. Idempotent: re-sending the
/// same signal updates the single existing row.
pub async fn complete_material(
    State(state): State<AppState>,
    principal: Principal,
    Path((course_id, material_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CompleteMaterial>,
) -> AppResult<Json<ProgressRecord>> {
    // Progress may only exist under an enrollment.
    require_enrollment(&state, &principal, course_id).await?;

    let material = CourseRepository::get_material(&state.db, material_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("material {material_id}")))?;
    if material.course_id != course_id {
        return Err(AppError::NotFound(format!(
            "material {material_id} does not belong to course {course_id}"
        )));
    }

    let record = state
        .progress_store
        .upsert_progress(ProgressUpdate {
            account_id: principal.account_id,
            course_id,
            material_id,
            completed: payload.completed,
        })
        .await?;
    Ok(Json(record))
}

/// Overall completion statistics for the current principal. Failures are
/// surfaced as errors, never as an all-zero report.
pub async fn my_summary(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ProgressSummary>> {
    let summary = progress_summary(state.progress_store.as_ref(), principal.account_id).await?;
    Ok(Json(summary))
}

pub async fn my_course_progress(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<CourseProgress>> {
    require_enrollment(&state, &principal, course_id).await?;
    let progress =
        course_progress(state.progress_store.as_ref(), principal.account_id, course_id).await?;
    Ok(Json(progress))
}

/// Admin-only view of any account's summary.
pub async fn account_summary(
    State(state): State<AppState>,
    principal: Principal,
    Path(account_id): Path<Uuid>,
) -> AppResult<Json<ProgressSummary>> {
    if principal.role != Role::Admin {
        return Err(AppError::Authorization(
            "admin role required to read another account's progress".into(),
        ));
    }

    AccountRepository::get_account(&state.db, account_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

    let summary = progress_summary(state.progress_store.as_ref(), account_id).await?;
    Ok(Json(summary))
}

async fn require_enrollment(
    state: &AppState,
    principal: &Principal,
    course_id: Uuid,
) -> AppResult<()> {
    EnrollmentRepository::get_enrollment(&state.db, principal.account_id, course_id)
        .await?
        .ok_or_else(|| AppError::Authorization(format!("not enrolled in course {course_id}")))?;
    Ok(())
}
