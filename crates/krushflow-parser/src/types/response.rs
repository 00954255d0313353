//! Response bodies for the HTTP API

use serde::{Deserialize, Serialize};

use super::document::ParsedDocument;
use super::session::{ServerData, Session};

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "KrushFlow Document Parser API";

/// Response from `POST /api/parse`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub success: bool,
    pub session_id: u64,
    pub parsed_documents: Vec<ParsedDocument>,
    pub total_documents: usize,
    pub message: String,
}

/// Response from `GET /api/data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: ServerData,
    pub total_sessions: usize,
}

/// Response from `GET /api/data/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session: Session,
}

/// Response carrying only a confirmation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Response from `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: super::now_iso(),
            service: SERVICE_NAME.to_string(),
        }
    }
}
