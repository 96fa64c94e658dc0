use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::{
    app_state::AppState,
    middleware::{auth::require_principal, tracing::observability_middleware},
    modules::{courses::course_routes, progress::progress_routes},
};

pub fn create_router(state: AppState) -> Router {
    let api = course_routes()
        .merge(progress_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_principal,
        ));

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(middleware::from_fn(observability_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Coursehub backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "status": "ok",
        "service": state.env.app.name,
        "environment": format!("{:?}", state.env.app.environment).to_lowercase(),
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}
