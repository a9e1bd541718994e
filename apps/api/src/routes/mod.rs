pub mod health;

use axum::{routing::get, Router};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/interviews",
            get(handlers::handle_list_interviews).post(handlers::handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get_interview)
                .put(handlers::handle_update_interview)
                .delete(handlers::handle_delete_interview),
        )
        .with_state(state)
}
