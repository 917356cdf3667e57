use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::session::ChatSession;

/// Handle to one session. Holding the lock serializes pipeline runs, so a
/// session never has two pipelines in flight.
pub type SharedSession = Arc<Mutex<ChatSession>>;

/// In-memory registry of live sessions. Nothing outlives the process.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(ChatSession::new())));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Ends a session, discarding its history. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}
