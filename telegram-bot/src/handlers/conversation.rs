//! Shared text exchange: append the user's turn, complete over the bounded history, append the reply.

use std::sync::Arc;

use llm_client::{CompletionGateway, CompletionRequest};
use prompt::Turn;
use storage::{ConversationLocks, HistoryStore};
use tracing::{info, instrument, warn};

/// One conversation round trip on top of a [`HistoryStore`] and a [`CompletionGateway`].
///
/// Exchanges for the same conversation are serialized by [`ConversationLocks`], so the user
/// and assistant turns of one exchange are always adjacent in the history.
pub struct ConversationService {
    history: Arc<dyn HistoryStore>,
    gateway: Arc<dyn CompletionGateway>,
    locks: ConversationLocks,
}

impl ConversationService {
    pub fn new(history: Arc<dyn HistoryStore>, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            history,
            gateway,
            locks: ConversationLocks::new(),
        }
    }

    /// Returns the model's reply to `user_text` given the conversation so far.
    ///
    /// On gateway failure the user turn stays in the history and the error is returned.
    /// Persistence failures are logged and do not fail the exchange.
    #[instrument(skip(self, user_text), fields(chars = user_text.chars().count()))]
    pub async fn exchange(&self, conversation_id: &str, user_text: String) -> anyhow::Result<String> {
        let _guard = self.locks.lock(conversation_id).await;

        self.append(conversation_id, Turn::user(user_text));
        let turns = self.history.get(conversation_id);
        info!(
            conversation_id = %conversation_id,
            turns = turns.len(),
            "step: requesting completion"
        );

        let reply = self.gateway.complete(CompletionRequest::new(turns)).await?;

        self.append(conversation_id, Turn::assistant(reply.clone()));
        Ok(reply)
    }

    fn append(&self, conversation_id: &str, turn: Turn) {
        if let Err(e) = self.history.append(conversation_id, turn) {
            warn!(
                error = %e,
                conversation_id = %conversation_id,
                "Failed to persist history; keeping in-memory state"
            );
        }
    }
}
