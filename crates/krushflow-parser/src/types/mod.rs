//! Core types for the parser service

pub mod document;
pub mod response;
pub mod session;

pub use document::{DocumentInput, Extraction, ImageMetadata, Metadata, ParseStatus, ParsedDocument};
pub use response::{DataResponse, HealthResponse, MessageResponse, ParseResponse, SessionResponse};
pub use session::{ServerData, Session};

use chrono::{SecondsFormat, Utc};

/// Current time as an RFC 3339 string, microsecond precision
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
