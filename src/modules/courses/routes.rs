use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{
    enroll, get_course, list_categories, list_courses, list_materials, rate_course,
};

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/courses", get(list_courses))
        .route("/courses/:course_id", get(get_course))
        .route("/courses/:course_id/materials", get(list_materials))
        .route("/courses/:course_id/enroll", post(enroll))
        .route("/courses/:course_id/ratings", post(rate_course))
}
