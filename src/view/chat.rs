//! Chat transcript and composer

use super::{Effect, UiState};
use crate::api::{ApiError, ApiResult, ChatReply, ChatRequest, UploadReply};

/// Agent line shown when a chat turn fails
pub const CHAT_FAILED: &str = "Sorry, something went wrong.";

/// Who wrote a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Agent,
}

impl Sender {
    /// CSS class of the message bubble
    pub fn class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Agent => "agent",
        }
    }
}

/// One rendered message, one paragraph per source line
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub paragraphs: Vec<String>,
}

impl ChatMessage {
    pub fn new(sender: Sender, content: &str) -> Self {
        Self {
            sender,
            paragraphs: content.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Handle of a "thinking" placeholder, owned by one in-flight submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    Thinking(ThinkingId),
}

/// Ordered chat transcript
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    // never reset, so a placeholder from before a clear() cannot collide
    next_thinking: u64,
}

impl Transcript {
    pub fn push(&mut self, message: ChatMessage) {
        self.entries.push(TranscriptEntry::Message(message));
    }

    pub fn show_thinking(&mut self) -> ThinkingId {
        let id = ThinkingId(self.next_thinking);
        self.next_thinking += 1;
        self.entries.push(TranscriptEntry::Thinking(id));
        id
    }

    pub fn remove_thinking(&mut self, id: ThinkingId) {
        self.entries
            .retain(|entry| !matches!(entry, TranscriptEntry::Thinking(t) if *t == id));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Messages in order, skipping placeholders
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter().filter_map(|entry| match entry {
            TranscriptEntry::Message(message) => Some(message),
            TranscriptEntry::Thinking(_) => None,
        })
    }

    pub fn is_thinking(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, TranscriptEntry::Thinking(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl UiState {
    /// Take the composer text as a chat turn. Blank input is rejected
    /// without touching the transcript.
    pub fn begin_chat(&mut self) -> Option<(ChatRequest, ThinkingId)> {
        let message = self.composer.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::new(Sender::User, &message));
        self.composer.clear();
        let thinking = self.transcript.show_thinking();

        let request = ChatRequest {
            message,
            session_id: self.current_session.clone(),
        };
        Some((request, thinking))
    }

    pub fn finish_chat(&mut self, thinking: ThinkingId, result: ApiResult<ChatReply>) -> Vec<Effect> {
        self.transcript.remove_thinking(thinking);

        match result {
            Ok(reply) => {
                if let Some(id) = reply.session_id {
                    self.current_session = Some(id);
                }
                if let Some(text) = reply.response.filter(|t| !t.is_empty()) {
                    self.transcript.push(ChatMessage::new(Sender::Agent, &text));
                }
                // a chat turn may have created calendar events
                vec![Effect::LoadSessions, Effect::FetchEvents]
            }
            Err(e) => {
                tracing::error!("Error: {}", e);
                self.transcript.push(ChatMessage::new(Sender::Agent, CHAT_FAILED));
                Vec::new()
            }
        }
    }

    pub fn begin_upload(&mut self, file_name: &str) {
        self.file_selection = Some(file_name.to_string());
    }

    /// Report the upload in the transcript and release the file picker
    pub fn finish_upload(&mut self, file_name: &str, result: ApiResult<UploadReply>) {
        let notice = match result {
            Ok(reply) if reply.success => format!("✓ File \"{}\" uploaded successfully!", file_name),
            Ok(reply) => format!(
                "✗ Upload failed: {}",
                reply.error.unwrap_or_else(|| "unknown error".to_string())
            ),
            Err(e) => {
                tracing::error!("Upload error: {}", e);
                "✗ Upload failed.".to_string()
            }
        };
        self.transcript.push(ChatMessage::new(Sender::Agent, &notice));
        self.file_selection = None;
    }

    /// The picked file could not be read locally, so nothing was sent
    pub fn fail_upload_read(&mut self, file_name: &str, reason: &str) {
        self.finish_upload(
            file_name,
            Err(ApiError::Transport(format!("could not read {}: {}", file_name, reason))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SessionId;

    #[test]
    fn test_blank_input_rejected() {
        let mut state = UiState::default();
        state.composer = "  \n\t ".to_string();
        assert!(state.begin_chat().is_none());
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_begin_chat_shows_user_message_and_placeholder() {
        let mut state = UiState::default();
        state.current_session = Some(SessionId::new("s1"));
        state.composer = "  book dentist  ".to_string();

        let (request, _) = state.begin_chat().unwrap();

        assert_eq!(request.message, "book dentist");
        assert_eq!(request.session_id, Some(SessionId::new("s1")));
        assert!(state.composer.is_empty());
        assert_eq!(state.transcript.len(), 2);
        assert!(state.transcript.is_thinking());
    }

    #[test]
    fn test_finish_chat_adopts_server_session() {
        let mut state = UiState::default();
        state.composer = "hi".to_string();
        let (_, thinking) = state.begin_chat().unwrap();

        let effects = state.finish_chat(
            thinking,
            Ok(ChatReply {
                session_id: Some(SessionId::new("new-1")),
                response: Some("Hello!\nHow can I help?".to_string()),
            }),
        );

        assert_eq!(effects, vec![Effect::LoadSessions, Effect::FetchEvents]);
        assert_eq!(state.current_session, Some(SessionId::new("new-1")));
        assert!(!state.transcript.is_thinking());
        let messages: Vec<&ChatMessage> = state.transcript.messages().collect();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].paragraphs, vec!["Hello!", "How can I help?"]);
    }

    #[test]
    fn test_finish_chat_without_response_text() {
        let mut state = UiState::default();
        state.composer = "hi".to_string();
        let (_, thinking) = state.begin_chat().unwrap();

        state.finish_chat(thinking, Ok(ChatReply::default()));

        assert_eq!(state.transcript.messages().count(), 1);
        assert!(state.current_session.is_none());
    }

    #[test]
    fn test_failed_chat_appends_generic_message() {
        let mut state = UiState::default();
        state.composer = "hi".to_string();
        let (_, thinking) = state.begin_chat().unwrap();

        let effects = state.finish_chat(thinking, Err(ApiError::Transport("offline".to_string())));

        assert!(effects.is_empty());
        assert!(!state.transcript.is_thinking());
        let last = state.transcript.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Agent);
        assert_eq!(last.text(), CHAT_FAILED);
    }

    #[test]
    fn test_each_submission_owns_its_placeholder() {
        let mut state = UiState::default();
        state.composer = "first".to_string();
        let (_, first) = state.begin_chat().unwrap();
        state.composer = "second".to_string();
        let (_, second) = state.begin_chat().unwrap();

        state.finish_chat(first, Ok(ChatReply::default()));
        assert!(state.transcript.is_thinking());

        state.finish_chat(second, Ok(ChatReply::default()));
        assert!(!state.transcript.is_thinking());
    }

    #[test]
    fn test_upload_notices() {
        let mut state = UiState::default();

        state.begin_upload("notes.pdf");
        assert_eq!(state.file_selection.as_deref(), Some("notes.pdf"));
        state.finish_upload("notes.pdf", Ok(UploadReply { success: true, error: None }));
        assert!(state.file_selection.is_none());

        state.begin_upload("big.zip");
        state.finish_upload(
            "big.zip",
            Ok(UploadReply { success: false, error: Some("too large".to_string()) }),
        );
        state.begin_upload("x.txt");
        state.finish_upload("x.txt", Err(ApiError::Transport("offline".to_string())));
        assert!(state.file_selection.is_none());

        let texts: Vec<String> = state.transcript.messages().map(|m| m.text()).collect();
        assert_eq!(
            texts,
            vec![
                "✓ File \"notes.pdf\" uploaded successfully!",
                "✗ Upload failed: too large",
                "✗ Upload failed.",
            ]
        );
    }

    #[test]
    fn test_unreadable_file_reports_failure_and_releases_picker() {
        let mut state = UiState::default();
        state.file_selection = Some("scan.pdf".to_string());

        state.fail_upload_read("scan.pdf", "NotReadableError");

        let texts: Vec<String> = state.transcript.messages().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["✗ Upload failed."]);
        assert_eq!(state.file_selection, None);
    }
}
