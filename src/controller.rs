//! Action Dispatch
//!
//! The [`Controller`] turns user actions into backend requests and feeds
//! the responses back into the [`UiState`]. Every action is one
//! request/response exchange followed by the refreshes its handler asks
//! for; nothing is retried.
//!
//! The state is only touched inside synchronous [`StateCell`] calls, so
//! several dispatches may be in flight on one thread without ever
//! observing a half-applied update.

use crate::api::{Backend, FileUpload, QuizRequest, SessionId};
use crate::view::{delete_confirmation, Clock, Effect, StateCell, UiState};

/// Something the user did
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Show a view by name (`chat`, `tasks`, `dashboard`, `quizzes`)
    SwitchView(String),
    StartNewChat,
    LoadSessions,
    LoadSession(SessionId),
    DeleteSession(SessionId),
    /// Send whatever is in the composer
    SubmitChat,
    UploadFile(FileUpload),
    FetchEvents,
    ToggleEventCompletion { event_id: String, summary: String },
    DeleteCalendarEvent { event_id: String, summary: String },
    LoadManualTasks,
    /// Add whatever is in the task input
    AddManualTask,
    LoadDashboard,
    LoadUploads,
    StartQuiz(QuizRequest),
    AnswerQuestion { index: usize, choice: usize },
    BackToQuizSelection,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SwitchView(_) => "switch_view",
            Action::StartNewChat => "start_new_chat",
            Action::LoadSessions => "load_sessions",
            Action::LoadSession(_) => "load_session",
            Action::DeleteSession(_) => "delete_session",
            Action::SubmitChat => "submit_chat",
            Action::UploadFile(_) => "upload_file",
            Action::FetchEvents => "fetch_events",
            Action::ToggleEventCompletion { .. } => "toggle_event_completion",
            Action::DeleteCalendarEvent { .. } => "delete_calendar_event",
            Action::LoadManualTasks => "load_manual_tasks",
            Action::AddManualTask => "add_manual_task",
            Action::LoadDashboard => "load_dashboard",
            Action::LoadUploads => "load_uploads",
            Action::StartQuiz(_) => "start_quiz",
            Action::AnswerQuestion { .. } => "answer_question",
            Action::BackToQuizSelection => "back_to_quiz_selection",
        }
    }
}

/// Blocking user dialogs
pub trait Dialogs {
    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> bool;

    /// Show a notice the user has to acknowledge
    fn alert(&self, message: &str);
}

/// Mediates between the UI state and the backend
pub struct Controller<S, B, D, C> {
    state: S,
    backend: B,
    dialogs: D,
    clock: C,
}

impl<S, B, D, C> Controller<S, B, D, C>
where
    S: StateCell,
    B: Backend,
    D: Dialogs,
    C: Clock,
{
    pub fn new(state: S, backend: B, dialogs: D, clock: C) -> Self {
        Self {
            state,
            backend,
            dialogs,
            clock,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// First paint: events, sessions, manual tasks and the dashboard
    pub async fn initialize(&self) {
        tracing::debug!("initializing view state");
        self.run(vec![
            Effect::FetchEvents,
            Effect::LoadSessions,
            Effect::LoadManualTasks,
            Effect::LoadDashboard,
        ])
        .await;
    }

    /// Handle one user action to completion, follow-up refreshes included
    pub async fn dispatch(&self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");

        let effects = match action {
            Action::SwitchView(name) => self.state.update(|s| s.switch_view(&name)),
            Action::StartNewChat => self.state.update(|s| s.start_new_chat()),
            Action::LoadSessions => vec![Effect::LoadSessions],
            Action::LoadSession(id) => self.load_session(id).await,
            Action::DeleteSession(id) => {
                let result = self.backend.delete_session(&id).await;
                self.state.update(|s| s.finish_delete_session(&id, result))
            }
            Action::SubmitChat => self.submit_chat().await,
            Action::UploadFile(file) => {
                self.state.update(|s| s.begin_upload(&file.name));
                let result = self.backend.upload(&file).await;
                self.state.update(|s| s.finish_upload(&file.name, result));
                Vec::new()
            }
            Action::FetchEvents => vec![Effect::FetchEvents],
            Action::ToggleEventCompletion { event_id, summary } => {
                let result = self.backend.mark_event_complete(&event_id, &summary).await;
                self.state.update(|s| s.finish_toggle_event(&event_id, result))
            }
            Action::DeleteCalendarEvent { event_id, summary } => {
                if !self.dialogs.confirm(&delete_confirmation(&summary)) {
                    tracing::debug!(event_id = %event_id, "delete declined");
                    return;
                }
                let result = self.backend.delete_calendar_event(&event_id).await;
                self.state.update(|s| s.finish_delete_event(&event_id, result))
            }
            Action::LoadManualTasks => vec![Effect::LoadManualTasks],
            Action::AddManualTask => {
                let Some(text) = self.state.update(|s| s.begin_add_task()) else {
                    return;
                };
                let result = self.backend.add_manual_task(&text).await;
                self.state.update(|s| s.finish_add_task(result))
            }
            Action::LoadDashboard => vec![Effect::LoadDashboard],
            Action::LoadUploads => {
                let result = self.backend.uploads().await;
                self.state.update(|s| s.quiz.finish_load_uploads(result));
                Vec::new()
            }
            Action::StartQuiz(request) => {
                self.state.update(|s| s.begin_quiz(&request));
                let result = self.backend.generate_quiz(&request).await;
                self.state.update(|s| s.finish_quiz(result));
                Vec::new()
            }
            Action::AnswerQuestion { index, choice } => {
                self.state.update(|s| s.quiz.answer(index, choice));
                Vec::new()
            }
            Action::BackToQuizSelection => {
                self.state.update(|s| s.quiz.back_to_selection());
                Vec::new()
            }
        };

        self.run(effects).await;
    }

    async fn load_session(&self, id: SessionId) -> Vec<Effect> {
        if !self.state.read(|s| s.needs_history(&id)) {
            tracing::debug!(session = %id, "session already open");
            return Vec::new();
        }
        let result = self.backend.history(&id).await;
        self.state.update(|s| s.finish_load_session(id, result))
    }

    async fn submit_chat(&self) -> Vec<Effect> {
        let Some((request, thinking)) = self.state.update(UiState::begin_chat) else {
            return Vec::new();
        };
        let result = self.backend.chat(&request).await;
        self.state.update(|s| s.finish_chat(thinking, result))
    }

    async fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.perform(effect).await;
        }
    }

    async fn perform(&self, effect: Effect) {
        match effect {
            Effect::LoadSessions => {
                let result = self.backend.sessions().await;
                self.state.update(|s| s.finish_load_sessions(result));
            }
            Effect::FetchEvents => {
                let result = self.backend.events().await;
                self.state.update(|s| s.finish_fetch_events(result, &self.clock));
            }
            Effect::LoadManualTasks => {
                let result = self.backend.manual_tasks().await;
                self.state.update(|s| s.finish_load_manual_tasks(result));
            }
            Effect::LoadDashboard => {
                let result = self.backend.dashboard_stats().await;
                self.state.update(|s| s.finish_load_dashboard(result, &self.clock));
            }
            Effect::Alert(message) => self.dialogs.alert(&message),
        }
    }
}
