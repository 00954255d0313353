//! Session records and the persisted collection

use serde::{Deserialize, Serialize};

use super::document::ParsedDocument;
use super::now_iso;

/// One batch parse request and its results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// 1-based; restarts at 1 after a clear
    pub id: u64,
    pub timestamp: String,
    pub document_count: usize,
    pub documents: Vec<ParsedDocument>,
}

/// Entire persisted state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerData {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl ServerData {
    /// Id the next appended session receives
    pub fn next_session_id(&self) -> u64 {
        self.sessions.len() as u64 + 1
    }

    /// Append a new session holding `documents` and return it
    pub fn append_session(&mut self, documents: Vec<ParsedDocument>) -> &Session {
        let session = Session {
            id: self.next_session_id(),
            timestamp: now_iso(),
            document_count: documents.len(),
            documents,
        };
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    /// First session with the given id
    pub fn find_session(&self, id: u64) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
