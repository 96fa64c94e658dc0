use axum::{
    routing::{get, put},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{account_summary, complete_material, my_course_progress, my_summary};

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(my_summary))
        .route("/progress/:course_id", get(my_course_progress))
        .route(
            "/courses/:course_id/materials/:material_id/progress",
            put(complete_material),
        )
        .route("/accounts/:account_id/progress", get(account_summary))
}
