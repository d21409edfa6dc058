use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/sagepay/server/complete-create-card",
            post(handlers::sagepay::complete_create_card),
        )
        .with_state(state)
}
