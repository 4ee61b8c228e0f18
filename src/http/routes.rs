use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session view
        .route("/session", get(handlers::get_session))
        .route("/status/:entry_id", delete(handlers::dismiss_status))
        // Controls
        .route("/affordances/:affordance", post(handlers::press_affordance))
        // Report handoff
        .route("/report", get(handlers::get_report))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
