//! HTTP API
//!
//! Routers per resource, assembled with middleware by [`build_router`].

pub mod health;
pub mod request;
pub mod restaurants;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use self::request::MAX_IMAGES_PER_REQUEST;

/// Headroom for the `data` field and multipart framing
const BODY_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware
pub fn routes() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(restaurants::router())
}

/// Fully configured application
pub fn build_router(state: ServerState) -> Router {
    let config = state.config.clone();
    let body_limit = config
        .max_upload_bytes
        .saturating_mul(MAX_IMAGES_PER_REQUEST + 1)
        .saturating_add(BODY_OVERHEAD_BYTES);

    let mut app = routes();

    // Local uploads are served back; S3 media lives behind its own URL
    if config.media_s3_bucket.is_none() {
        app = app.nest_service("/uploads", ServeDir::new(config.uploads_dir()));
    }

    app.layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
