//! Session storage backends.
//!
//! `SessionStore` is the seam between session handling and where the bags
//! live. `MemoryStore` keeps them in a concurrent map for the life of the
//! process.

use super::record::SessionData;
use crate::config::Result;
use async_trait::async_trait;
use papaya::HashMap;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the bag saved under `session_id`, or `None` if the id is unknown.
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>>;

    /// Saves `data` under `session_id`, replacing any previous bag.
    async fn save(&self, session_id: &str, data: &SessionData) -> Result<()>;

    /// Number of sessions currently stored.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// In-process store. Sessions live until the process exits.
#[derive(Default)]
pub struct MemoryStore {
    sessions: HashMap<String, SessionData>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>> {
        Ok(self.sessions.pin().get(session_id).cloned())
    }

    async fn save(&self, session_id: &str, data: &SessionData) -> Result<()> {
        self.sessions
            .pin()
            .insert(session_id.to_string(), data.clone());
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.sessions.pin().len())
    }
}
