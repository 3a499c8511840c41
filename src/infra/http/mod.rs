mod listing;
mod middleware;
pub mod selectors;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{application::posts::PostListingService, infra::assets};

pub use middleware::REQUEST_ID_HEADER;

#[derive(Clone)]
pub struct HttpState {
    pub listing: Arc<PostListingService>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(listing::listing_page))
        .route("/posts/panel", get(listing::listing_panel))
        .route("/_health", get(health))
        .route("/static/{*path}", get(assets::serve))
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}

async fn health() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
