use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::access::{can_view, filter_visible, Principal};
use crate::app_state::AppState;
use crate::db::{
    Category, CategoryRepository, Course, CourseRating, CourseRepository, DatabaseError,
    Enrollment, EnrollmentRepository, Material, NewCourseRating, RatingRepository,
};
use crate::error::{AppError, AppResult};

/// All visible courses for the current principal, in catalog order. Denied
/// courses are omitted silently.
pub async fn list_courses(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepository::list_courses(&state.db).await?;
    let visible = filter_visible(
        state.policy,
        &principal,
        courses,
        state.category_index.as_ref(),
    )
    .await
    .map_err(AppError::access_check_failed)?;
    Ok(Json(visible))
}

/// The category tags known to this deployment; empty when the restriction
/// feature is not provisioned.
pub async fn list_categories(
    State(state): State<AppState>,
    _principal: Principal,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepository::list_categories(&state.db).await?;
    Ok(Json(categories))
}

pub async fn get_course(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<Course>> {
    let course = fetch_course(&state, course_id).await?;
    ensure_can_view(&state, &principal, &course).await?;
    Ok(Json(course))
}

pub async fn list_materials(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<Vec<Material>>> {
    let course = fetch_course(&state, course_id).await?;
    ensure_can_view(&state, &principal, &course).await?;
    let materials = CourseRepository::list_materials(&state.db, course_id).await?;
    Ok(Json(materials))
}

pub async fn enroll(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<Enrollment>> {
    let course = fetch_course(&state, course_id).await?;
    ensure_can_view(&state, &principal, &course).await?;

    match EnrollmentRepository::create_enrollment(&state.db, principal.account_id, course_id).await
    {
        Ok(enrollment) => Ok(Json(enrollment)),
        Err(DatabaseError::Duplicate) => Err(AppError::Conflict(format!(
            "already enrolled in course {course_id}"
        ))),
        Err(err) => Err(err.into()),
    }
}

/// Submit or revise a rating. Enrollment is required; a repeat submission
/// updates the existing rating instead of adding a second one.
pub async fn rate_course(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<NewCourseRating>,
) -> AppResult<Json<CourseRating>> {
    payload.validate()?;
    fetch_course(&state, course_id).await?;

    EnrollmentRepository::get_enrollment(&state.db, principal.account_id, course_id)
        .await?
        .ok_or_else(|| {
            AppError::Authorization(format!("enrollment in course {course_id} required to rate it"))
        })?;

    let rating =
        RatingRepository::upsert_rating(&state.db, principal.account_id, course_id, &payload)
            .await?;
    Ok(Json(rating))
}

async fn fetch_course(state: &AppState, course_id: Uuid) -> AppResult<Course> {
    CourseRepository::get_course(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("course {course_id}")))
}

/// Gate a direct course fetch. A storage failure during the check rejects
/// the request (503) instead of deciding access either way.
async fn ensure_can_view(
    state: &AppState,
    principal: &Principal,
    course: &Course,
) -> AppResult<()> {
    let allowed = can_view(state.policy, principal, course, state.category_index.as_ref())
        .await
        .map_err(AppError::access_check_failed)?;
    if allowed {
        Ok(())
    } else {
        Err(AppError::Authorization(format!(
            "course {} is not visible to this account",
            course.id
        )))
    }
}
