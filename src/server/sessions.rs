// src/server/sessions.rs
// In-memory browser sessions, one conversation each

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::conversation::Conversation;

/// One browser tab's conversation.
///
/// Readers always see the latest snapshot. Writers (a streaming turn or a
/// clear) must hold the turn lock, so at most one turn runs per session.
pub struct Session {
    pub id: Uuid,
    conversation: RwLock<Conversation>,
    turn: Arc<Mutex<()>>,
}

/// Held for the lifetime of one turn
pub type TurnGuard = OwnedMutexGuard<()>;

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            conversation: RwLock::new(Conversation::new()),
            turn: Arc::new(Mutex::new(())),
        }
    }

    pub async fn conversation(&self) -> Conversation {
        self.conversation.read().await.clone()
    }

    pub async fn replace(&self, conversation: Conversation) {
        *self.conversation.write().await = conversation;
    }

    pub async fn clear(&self) {
        self.conversation.write().await.clear();
    }

    /// `None` while another turn is in flight
    pub fn try_begin_turn(&self) -> Option<TurnGuard> {
        self.turn.clone().try_lock_owned().ok()
    }
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Arc<Session> {
        let session = Arc::new(Session::new(Uuid::new_v4()));
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        tracing::debug!(session = %session.id, "Session created");
        session
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
