//! API routes for the parser server

pub mod parse;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use crate::server::state::AppState;
use crate::types::HealthResponse;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Parsing - with larger body limit for base64 image uploads
        .route(
            "/parse",
            post(parse::parse_documents).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Session queries
        .route("/data", get(sessions::get_all_data))
        .route("/data/:id", get(sessions::get_session))
        .route("/clear", post(sessions::clear_data))
        // Info
        .route("/info", get(info))
}

/// GET /health - Static status, no storage access
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// API info endpoint
async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "krushflow-parser",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document upload and image metadata extraction with simulated OCR",
        "endpoints": {
            "POST /api/parse": "Parse uploaded documents",
            "GET /api/data": "Get all parsed data",
            "GET /api/data/:id": "Get specific session data",
            "POST /api/clear": "Clear all server data",
            "GET /health": "Health check",
            "GET /": "Document parser interface"
        }
    }))
}
