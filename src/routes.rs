use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let max_upload_bytes = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index).post(handlers::transcribe))
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
