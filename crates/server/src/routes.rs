pub mod cats;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn cat_routes() -> Router<AppState> {
    Router::new()
        .route("/cats", get(cats::get_all_cats).post(cats::create_new_cat))
        .route(
            "/cats/:cat_id",
            get(cats::get_one_cat)
                .patch(cats::update_one_cat)
                .delete(cats::delete_one_cat),
        )
}

/// Build the full application router: `/health` plus the versioned cat API.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, cat_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
