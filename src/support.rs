use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::commands::{Command, CommandConfig};
use crate::form_controller::{self, OutboundMessage};
use crate::session_store::{SessionStore, StoreError, UserKey};


/// Ties the form controller to session storage for every inbound message.
///
/// Messages from the same user are handled one at a time; different users run in parallel.
pub struct Support {
    store: Arc<dyn SessionStore>,
    commands: CommandConfig,
    user_locks: Mutex<HashMap<UserKey, Arc<Mutex<()>>>>,
}


impl Support {
    pub fn new(store: Arc<dyn SessionStore>, commands: CommandConfig) -> Self {
        Self {
            store,
            commands,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn process(&self, user: UserKey, text: &str) -> Result<OutboundMessage, StoreError> {
        let (text, is_start) = match Command::classify(text, &self.commands) {
            Command::Help => {
                debug!(user = %user, "Help requested");
                return Ok(OutboundMessage::Greeting);
            }
            Command::StartForm => (String::new(), true),
            Command::Text(text) => (text, false),
        };

        let lock = self.user_lock(user).await;
        let reply = {
            let _guard = lock.lock().await;
            self.advance_form(user, &text, is_start).await
        };
        self.release_user_lock(user, lock).await;

        reply
    }

    /// Renders a reply as the text the user sees, naming the configured start command.
    pub fn render(&self, reply: &OutboundMessage) -> String {
        match reply {
            OutboundMessage::Greeting => form_controller::greeting(&self.commands.start_form),
            other => other.to_string(),
        }
    }

    async fn advance_form(&self, user: UserKey, text: &str, is_start: bool) -> Result<OutboundMessage, StoreError> {
        let state = self.store.load(user).await.map_err(|e| {
            warn!(user = %user, error = %e, "Failed to load session");
            e
        })?;

        let (next, reply) = form_controller::handle(state, text, is_start);

        match reply {
            OutboundMessage::AskAge => info!(user = %user, "Calorie form started"),
            OutboundMessage::InvalidNumber => debug!(user = %user, step = ?state.step, "Rejected non-numeric answer"),
            OutboundMessage::Calories(calories) => info!(user = %user, calories, "Calorie form completed"),
            _ => debug!(user = %user, from = ?state.step, to = ?next.step, "Form advanced"),
        }

        if next != state {
            self.store.save(user, next).await.map_err(|e| {
                warn!(user = %user, error = %e, "Failed to save session");
                e
            })?;
        }

        Ok(reply)
    }

    async fn user_lock(&self, user: UserKey) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks.entry(user).or_default().clone()
    }

    async fn release_user_lock(&self, user: UserKey, lock: Arc<Mutex<()>>) {
        let mut locks = self.user_locks.lock().await;
        // One reference in the map, one here: nobody else is waiting on this user.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&user);
        }
    }
}
