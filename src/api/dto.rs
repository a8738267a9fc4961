//! Data Transfer Objects
//!
//! Request and response types for the assistant backend endpoints.
//! Response types default every optional field so that a partially
//! filled payload still decodes.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Summary prefix the backend uses to mark a calendar event as done.
pub const COMPLETION_MARKER: &str = "✅ ";

/// Backends hand out ids as strings or bare integers depending on the store.
fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(n) => n.to_string(),
    })
}

// ============================================
// SESSION DTOs
// ============================================

/// Identifier of a persisted chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(#[serde(deserialize_with = "flexible_id")] pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry of `GET /sessions`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Session {
    pub id: SessionId,
    #[serde(default)]
    pub title: Option<String>,
}

/// Entry of `GET /history/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl HistoryMessage {
    /// Whether the stored turn was produced by the assistant
    pub fn is_agent(&self) -> bool {
        matches!(self.role.as_str(), "model" | "agent" | "assistant")
    }
}

// ============================================
// CHAT DTOs
// ============================================

/// `POST /chat` body. A missing session serializes as `null` so the
/// backend starts a new conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<SessionId>,
}

/// `POST /chat` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub response: Option<String>,
}

/// `POST /upload` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================
// CALENDAR DTOs
// ============================================

/// Start of a calendar event, either a timestamp or an all-day date
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EventStart {
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Calendar event as forwarded from the calendar bridge
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: Option<EventStart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Completion is carried in the summary text, not in a field of its own.
    pub fn is_completed(&self) -> bool {
        self.summary.starts_with(COMPLETION_MARKER)
    }
}

/// `GET /events` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

/// `POST /mark_event_complete` body
#[derive(Debug, Clone, Serialize)]
pub struct MarkCompleteRequest<'a> {
    pub event_id: &'a str,
    pub summary: &'a str,
}

/// `POST /delete_calendar_event` body
#[derive(Debug, Clone, Serialize)]
pub struct DeleteEventRequest<'a> {
    pub event_id: &'a str,
}

/// `{ok}` acknowledgement returned by the mutating endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// One topic of the quiz-derived knowledge profile
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KnowledgeEntry {
    pub topic: String,
    #[serde(default)]
    pub level: f64,
}

/// `GET /dashboard_stats` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_chats: u64,
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub upcoming_events_count: u64,
    #[serde(default)]
    pub knowledge_profile: Vec<KnowledgeEntry>,
    /// The backend occasionally emits `null` slots here.
    #[serde(default)]
    pub upcoming_events: Vec<Option<CalendarEvent>>,
}

// ============================================
// MANUAL TASK DTOs
// ============================================

/// User-entered to-do item
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ManualTask {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// `GET /tasks` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: Vec<ManualTask>,
}

/// `POST /tasks` body
#[derive(Debug, Clone, Serialize)]
pub struct NewTaskRequest<'a> {
    pub text: &'a str,
}

// ============================================
// QUIZ DTOs
// ============================================

/// Quiz generators offered by the quiz hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Questions drawn from recent conversations
    Recall,
    /// Mock interview for a job role
    Interview,
    /// Questions about an uploaded document
    Upload,
}

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [QuizMode::Recall, QuizMode::Interview, QuizMode::Upload];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::Recall => "recall",
            QuizMode::Interview => "interview",
            QuizMode::Upload => "upload",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuizMode::Recall => "Daily Recall",
            QuizMode::Interview => "Mock Interview",
            QuizMode::Upload => "Quiz My Uploads",
        }
    }
}

impl std::str::FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown quiz mode: {s}"))
    }
}

/// `POST /generate_quiz` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRequest {
    pub mode: QuizMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl QuizRequest {
    pub fn recall() -> Self {
        Self { mode: QuizMode::Recall, job_role: None, filename: None }
    }

    pub fn interview(job_role: impl Into<String>) -> Self {
        Self { mode: QuizMode::Interview, job_role: Some(job_role.into()), filename: None }
    }

    pub fn upload(filename: impl Into<String>) -> Self {
        Self { mode: QuizMode::Upload, job_role: None, filename: Some(filename.into()) }
    }
}

/// Single generated question
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// `POST /generate_quiz` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    /// Either a list of topic names or a free-form string
    #[serde(default)]
    pub topics: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Quiz {
    /// Topics flattened into a display line
    pub fn topics_label(&self) -> Option<String> {
        match self.topics.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let names: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                (!names.is_empty()).then(|| names.join(", "))
            }
            _ => None,
        }
    }
}

/// Entry of `GET /list_uploads`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedFile {
    pub name: String,
}

/// `GET /list_uploads` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadsResponse {
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}
