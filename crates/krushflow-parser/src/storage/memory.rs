//! In-memory session store

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::Result;
use crate::types::ServerData;

use super::SessionStore;

/// Session store that keeps the collection in process memory
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<ServerData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection
    pub fn with_data(data: ServerData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<ServerData> {
        Ok(self.data.lock().clone())
    }

    async fn save(&self, data: &ServerData) -> Result<()> {
        *self.data.lock() = data.clone();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
