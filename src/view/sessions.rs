//! Chat session list
//!
//! Owns the only piece of client-held identity state: the current session.

use super::{ChatMessage, Effect, Sender, UiState, View};
use crate::api::{ApiError, ApiResult, HistoryMessage, Session, SessionId};

/// Sidebar entry for one chat session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionItem {
    pub id: SessionId,
    pub title: String,
    pub active: bool,
}

impl UiState {
    /// Re-render the sidebar from `GET /sessions`. A failed fetch keeps the
    /// previous list on screen.
    pub fn finish_load_sessions(&mut self, result: ApiResult<Vec<Session>>) {
        match result {
            Ok(sessions) => {
                self.sessions = sessions
                    .into_iter()
                    .map(|session| SessionItem {
                        active: self.current_session.as_ref() == Some(&session.id),
                        title: session
                            .title
                            .filter(|t| !t.trim().is_empty())
                            .unwrap_or_else(|| "New Chat".to_string()),
                        id: session.id,
                    })
                    .collect();
            }
            Err(e) => tracing::error!("Error loading sessions: {}", e),
        }
    }

    /// Forget the current session and show an empty chat
    pub fn start_new_chat(&mut self) -> Vec<Effect> {
        self.current_session = None;
        self.transcript.clear();
        self.composer.clear();
        self.show(View::Chat)
    }

    /// Whether opening `id` needs a history fetch
    pub fn needs_history(&self, id: &SessionId) -> bool {
        self.current_session.as_ref() != Some(id)
    }

    /// Replace the transcript with the history of `id`
    pub fn finish_load_session(
        &mut self,
        id: SessionId,
        result: ApiResult<Vec<HistoryMessage>>,
    ) -> Vec<Effect> {
        match result {
            Ok(history) => {
                self.current_session = Some(id);
                self.transcript.clear();
                for message in &history {
                    let sender = if message.is_agent() { Sender::Agent } else { Sender::User };
                    self.transcript.push(ChatMessage::new(sender, &message.content));
                }
                vec![Effect::LoadSessions]
            }
            Err(e) => {
                tracing::error!("Error loading session {}: {}", id, e);
                Vec::new()
            }
        }
    }

    /// Settle a `DELETE /delete_session/{id}`. Any answer from the backend,
    /// error statuses included, leaves a deleted current session; only an
    /// unreachable backend keeps it. The sidebar is refreshed either way.
    pub fn finish_delete_session(&mut self, id: &SessionId, result: ApiResult<()>) -> Vec<Effect> {
        let answered = match result {
            Ok(()) => true,
            Err(ApiError::Transport(e)) => {
                tracing::error!("Error deleting session {}: {}", id, e);
                false
            }
            Err(e) => {
                tracing::warn!("Deleting session {} answered with {}", id, e);
                true
            }
        };

        let mut effects = Vec::new();
        if answered && self.current_session.as_ref() == Some(id) {
            effects.extend(self.start_new_chat());
        }
        effects.push(Effect::LoadSessions);
        effects
    }
}
