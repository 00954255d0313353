//! krushflow-parser: document upload service with simulated OCR
//!
//! Uploaded images arrive base64-encoded over HTTP, image metadata is read with
//! the `image` crate, and each batch is persisted as a session record in a
//! single JSON file.

pub mod config;
pub mod error;
pub mod extraction;
pub mod server;
pub mod storage;
pub mod types;

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use storage::{JsonFileStore, MemoryStore, SessionStore};
pub use types::{
    document::{DocumentInput, Extraction, ImageMetadata, Metadata, ParseStatus, ParsedDocument},
    session::{ServerData, Session},
};
