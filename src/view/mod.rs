//! View State
//!
//! Everything the UI shows is derived from one owned [`UiState`] value.
//! Each pane contributes an `impl UiState` block with two kinds of
//! handlers:
//!
//! - `begin_*` methods mutate the state synchronously before a request
//!   and return what the request needs (or `None` to abort).
//! - `finish_*` methods take the request's [`ApiResult`](crate::api::ApiResult),
//!   re-render the pane's subtree from scratch, and return follow-up
//!   [`Effect`]s for the controller to run.
//!
//! Handlers never await, so a [`StateCell`] is only ever borrowed for the
//! duration of one synchronous call.

mod chat;
mod clock;
mod dashboard;
mod events;
mod quiz;
mod router;
mod sessions;
mod tasks;

use std::cell::RefCell;

use crate::api::SessionId;

pub use chat::{ChatMessage, Sender, ThinkingId, Transcript, TranscriptEntry, CHAT_FAILED};
pub use clock::{resolve_start, Clock, EventTime, SystemClock};
pub use dashboard::{greeting_for, DashboardView, KnowledgeBar, UpcomingRow};
pub use events::{delete_confirmation, EventRow, EventsView, TaskRow};
pub use quiz::{QuestionCard, QuizScreen, QuizView};
pub use router::{UnknownView, View};
pub use sessions::SessionItem;
pub use tasks::ManualTaskRow;

/// Follow-up work requested by a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadSessions,
    FetchEvents,
    LoadManualTasks,
    LoadDashboard,
    /// Blocking user notification
    Alert(String),
}

/// Rendered list that may instead show a placeholder line
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    /// Not fetched yet
    Loading,
    Items(Vec<T>),
    /// Fetched, nothing to show
    Empty(String),
    /// Fetch failed
    Failed(String),
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Listing::Loading
    }
}

impl<T> Listing<T> {
    /// Items, or the empty placeholder when there are none
    pub fn from_items(items: Vec<T>, empty: &str) -> Self {
        if items.is_empty() {
            Listing::Empty(empty.to_string())
        } else {
            Listing::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Listing::Items(items) => items,
            _ => &[],
        }
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        match self {
            Listing::Items(items) => items,
            _ => &mut [],
        }
    }

    /// Line rendered in place of the list, if any
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Listing::Empty(text) | Listing::Failed(text) => Some(text),
            Listing::Loading | Listing::Items(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Listing::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Listing::Failed(_))
    }
}

/// Complete client-side state of the assistant UI
#[derive(Debug, Clone)]
pub struct UiState {
    /// Which of the four views is visible
    pub active_view: View,
    /// Chat session the transcript belongs to; `None` starts a new one
    pub current_session: Option<SessionId>,
    /// Sidebar list of chat sessions
    pub sessions: Vec<SessionItem>,
    pub transcript: Transcript,
    /// Chat input box
    pub composer: String,
    /// Name of the file currently held by the file picker
    pub file_selection: Option<String>,
    pub events: EventsView,
    pub manual_tasks: Listing<ManualTaskRow>,
    /// New manual task input box
    pub task_input: String,
    /// `None` until the first stats fetch succeeds
    pub dashboard: Option<DashboardView>,
    pub quiz: QuizView,
    /// Name used in the dashboard greeting
    pub user_name: String,
}

impl UiState {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            active_view: View::Chat,
            current_session: None,
            sessions: Vec::new(),
            transcript: Transcript::default(),
            composer: String::new(),
            file_selection: None,
            events: EventsView::default(),
            manual_tasks: Listing::Loading,
            task_input: String::new(),
            dashboard: None,
            quiz: QuizView::default(),
            user_name: user_name.into(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new("User")
    }
}

/// Shared, synchronously borrowed home of the [`UiState`].
///
/// Implemented by `RefCell` for the terminal front end and by a reactive
/// signal in the browser shell.
pub trait StateCell {
    fn update<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R;

    fn read<R>(&self, f: impl FnOnce(&UiState) -> R) -> R;
}

impl StateCell for RefCell<UiState> {
    fn update<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn read<R>(&self, f: impl FnOnce(&UiState) -> R) -> R {
        f(&self.borrow())
    }
}
