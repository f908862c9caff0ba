use std::collections::HashMap;

use serenity::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::conversation_state::ConversationState;


pub type UserKey = u64;


// Only persistent backends produce these; the in-memory store never fails.
#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}


/// Keyed storage for conversation snapshots.
///
/// Callers must not run two load/save cycles for the same user at once; `Support` takes care of that.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, user: UserKey) -> Result<ConversationState, StoreError>;
    async fn save(&self, user: UserKey, state: ConversationState) -> Result<(), StoreError>;
}


#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<UserKey, ConversationState>>,
}


impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}


#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user: UserKey) -> Result<ConversationState, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&user).copied().unwrap_or_else(ConversationState::new))
    }

    async fn save(&self, user: UserKey, state: ConversationState) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        // Idle snapshots carry no data, so the entry is dropped instead of kept around.
        if state.is_idle() {
            sessions.remove(&user);
        } else {
            sessions.insert(user, state);
        }
        Ok(())
    }
}
