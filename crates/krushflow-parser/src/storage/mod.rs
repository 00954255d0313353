//! Session storage
//!
//! Handlers load the whole [`ServerData`] collection, mutate it and save it
//! back on every request. There is no locking across that cycle: two
//! concurrent writers can lose an update or hand out the same session id.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ServerData;

/// Trait for session storage
///
/// Implementations:
/// - `JsonFileStore`: single pretty-printed JSON file
/// - `MemoryStore`: in-process, nothing persisted
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the full collection; empty when nothing has been saved yet
    async fn load(&self) -> Result<ServerData>;

    /// Replace the full collection
    async fn save(&self, data: &ServerData) -> Result<()>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
