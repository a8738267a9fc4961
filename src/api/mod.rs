//! Backend API
//!
//! The assistant backend is a fixed JSON-over-HTTP contract. This module
//! names its endpoints, describes its payloads ([`dto`]), and exposes the
//! [`Backend`] seam the view controller talks through.
//!
//! ## Endpoints
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | `/chat` | POST | Send a chat turn |
//! | `/upload` | POST | Upload a document (multipart) |
//! | `/events` | GET | Upcoming calendar events |
//! | `/mark_event_complete` | POST | Toggle the completion marker |
//! | `/delete_calendar_event` | POST | Delete a calendar event |
//! | `/sessions` | GET | Chat session list |
//! | `/delete_session/{id}` | DELETE | Delete a chat session |
//! | `/history/{id}` | GET | Messages of a chat session |
//! | `/dashboard_stats` | GET | Dashboard aggregates |
//! | `/tasks` | GET, POST | Manual to-do items |
//! | `/list_uploads` | GET | Uploaded documents |
//! | `/generate_quiz` | POST | Generate a quiz |

pub mod dto;
mod error;

#[cfg(feature = "native")]
mod client;

use async_trait::async_trait;

pub use dto::*;
pub use error::{ApiError, ApiResult};

#[cfg(feature = "native")]
pub use client::HttpBackend;

/// Endpoint paths, relative to the backend base URL
pub mod endpoints {
    use super::SessionId;

    pub const CHAT: &str = "/chat";
    pub const UPLOAD: &str = "/upload";
    pub const EVENTS: &str = "/events";
    pub const MARK_EVENT_COMPLETE: &str = "/mark_event_complete";
    pub const DELETE_CALENDAR_EVENT: &str = "/delete_calendar_event";
    pub const SESSIONS: &str = "/sessions";
    pub const DASHBOARD_STATS: &str = "/dashboard_stats";
    pub const TASKS: &str = "/tasks";
    pub const LIST_UPLOADS: &str = "/list_uploads";
    pub const GENERATE_QUIZ: &str = "/generate_quiz";

    pub fn history(id: &SessionId) -> String {
        format!("/history/{}", urlencoding::encode(id.as_str()))
    }

    pub fn delete_session(id: &SessionId) -> String {
        format!("/delete_session/{}", urlencoding::encode(id.as_str()))
    }
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }
}

/// Request/response access to the assistant backend.
///
/// Futures are not required to be `Send`: the browser implementation runs
/// on the single UI thread.
#[async_trait(?Send)]
pub trait Backend {
    /// `POST /chat`
    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatReply>;

    /// `POST /upload`
    async fn upload(&self, file: &FileUpload) -> ApiResult<UploadReply>;

    /// `GET /events`
    async fn events(&self) -> ApiResult<Vec<CalendarEvent>>;

    /// `POST /mark_event_complete`, returns the backend's `ok` flag
    async fn mark_event_complete(&self, event_id: &str, summary: &str) -> ApiResult<bool>;

    /// `POST /delete_calendar_event`, returns the backend's `ok` flag
    async fn delete_calendar_event(&self, event_id: &str) -> ApiResult<bool>;

    /// `GET /sessions`
    async fn sessions(&self) -> ApiResult<Vec<Session>>;

    /// `DELETE /delete_session/{id}`
    async fn delete_session(&self, id: &SessionId) -> ApiResult<()>;

    /// `GET /history/{id}`
    async fn history(&self, id: &SessionId) -> ApiResult<Vec<HistoryMessage>>;

    /// `GET /dashboard_stats`
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;

    /// `GET /tasks`
    async fn manual_tasks(&self) -> ApiResult<Vec<ManualTask>>;

    /// `POST /tasks`, returns the backend's `ok` flag
    async fn add_manual_task(&self, text: &str) -> ApiResult<bool>;

    /// `GET /list_uploads`
    async fn uploads(&self) -> ApiResult<Vec<UploadedFile>>;

    /// `POST /generate_quiz`
    async fn generate_quiz(&self, request: &QuizRequest) -> ApiResult<Quiz>;
}
