use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(handlers::zones::routes())
        .merge(handlers::records::routes())
        .merge(handlers::metrics::routes())
        .with_state(state)
}
