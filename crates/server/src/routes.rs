use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use service::records::RecordService;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

pub mod records;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordService>,
    /// Port announced by the health endpoint.
    pub port: u16,
}

impl AppState {
    pub fn new(records: Arc<RecordService>, port: u16) -> Self {
        Self { records, port }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(records::health))
        .route("/get/data", get(records::list_records))
        .route("/get/data/:id", get(records::get_record))
        .route("/add/data", post(records::create_record))
        .route("/update/data", post(records::update_record))
        .route("/delete/data", post(records::delete_record))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
