//! In-memory doubles for the controller seams

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::api::*;
use crate::controller::Dialogs;
use crate::view::Clock;

/// Queue of canned results for one endpoint. An exhausted script answers
/// with `Ok(T::default())`.
pub struct Script<T>(RefCell<VecDeque<ApiResult<T>>>);

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self(RefCell::new(VecDeque::new()))
    }
}

impl<T: Default> Script<T> {
    pub fn push(&self, result: ApiResult<T>) {
        self.0.borrow_mut().push_back(result);
    }

    fn next(&self) -> ApiResult<T> {
        self.0.borrow_mut().pop_front().unwrap_or_else(|| Ok(T::default()))
    }
}

/// [`Backend`] that replays scripted results and logs every request as
/// `METHOD path`
#[derive(Default)]
pub struct ScriptedBackend {
    pub chat: Script<ChatReply>,
    pub upload: Script<UploadReply>,
    pub events: Script<Vec<CalendarEvent>>,
    pub mark_complete: Script<bool>,
    pub delete_event: Script<bool>,
    pub sessions: Script<Vec<Session>>,
    pub delete_session: Script<()>,
    pub history: Script<Vec<HistoryMessage>>,
    pub dashboard: Script<DashboardStats>,
    pub manual_tasks: Script<Vec<ManualTask>>,
    pub add_task: Script<bool>,
    pub uploads: Script<Vec<UploadedFile>>,
    pub quiz: Script<Quiz>,
    log: RefCell<Vec<String>>,
    chat_requests: RefCell<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    fn record(&self, method: &str, path: &str) {
        self.log.borrow_mut().push(format!("{} {}", method, path));
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.log.borrow().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Backend for ScriptedBackend {
    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatReply> {
        self.record("POST", endpoints::CHAT);
        self.chat_requests.borrow_mut().push(request.clone());
        self.chat.next()
    }

    async fn upload(&self, _file: &FileUpload) -> ApiResult<UploadReply> {
        self.record("POST", endpoints::UPLOAD);
        self.upload.next()
    }

    async fn events(&self) -> ApiResult<Vec<CalendarEvent>> {
        self.record("GET", endpoints::EVENTS);
        self.events.next()
    }

    async fn mark_event_complete(&self, _event_id: &str, _summary: &str) -> ApiResult<bool> {
        self.record("POST", endpoints::MARK_EVENT_COMPLETE);
        self.mark_complete.next()
    }

    async fn delete_calendar_event(&self, _event_id: &str) -> ApiResult<bool> {
        self.record("POST", endpoints::DELETE_CALENDAR_EVENT);
        self.delete_event.next()
    }

    async fn sessions(&self) -> ApiResult<Vec<Session>> {
        self.record("GET", endpoints::SESSIONS);
        self.sessions.next()
    }

    async fn delete_session(&self, id: &SessionId) -> ApiResult<()> {
        self.record("DELETE", &endpoints::delete_session(id));
        self.delete_session.next()
    }

    async fn history(&self, id: &SessionId) -> ApiResult<Vec<HistoryMessage>> {
        self.record("GET", &endpoints::history(id));
        self.history.next()
    }

    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.record("GET", endpoints::DASHBOARD_STATS);
        self.dashboard.next()
    }

    async fn manual_tasks(&self) -> ApiResult<Vec<ManualTask>> {
        self.record("GET", endpoints::TASKS);
        self.manual_tasks.next()
    }

    async fn add_manual_task(&self, _text: &str) -> ApiResult<bool> {
        self.record("POST", endpoints::TASKS);
        self.add_task.next()
    }

    async fn uploads(&self) -> ApiResult<Vec<UploadedFile>> {
        self.record("GET", endpoints::LIST_UPLOADS);
        self.uploads.next()
    }

    async fn generate_quiz(&self, _request: &QuizRequest) -> ApiResult<Quiz> {
        self.record("POST", endpoints::GENERATE_QUIZ);
        self.quiz.next()
    }
}

/// [`Dialogs`] that answers every confirm the same way and keeps what it showed
pub struct RecordingDialogs {
    pub answer: Cell<bool>,
    pub confirms: RefCell<Vec<String>>,
    pub alerts: RefCell<Vec<String>>,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Cell::new(answer),
            confirms: RefCell::default(),
            alerts: RefCell::default(),
        }
    }
}

impl Dialogs for RecordingDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Clock stopped at one instant
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn at(rfc3339: &str) -> Self {
        Self(DateTime::parse_from_rfc3339(rfc3339).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }

    fn to_local(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(self.0.offset())
    }

    fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        self.0.offset().from_local_datetime(naive).single()
    }
}

/// Central European time in autumn 2026: `now` is 18 October 10:00 CEST,
/// and clocks go back from +02:00 to +01:00 at 25 October 01:00 UTC.
pub struct BerlinClock;

impl BerlinClock {
    fn offset_at(utc: NaiveDateTime) -> FixedOffset {
        let change = NaiveDate::from_ymd_opt(2026, 10, 25)
            .and_then(|d| d.and_hms_opt(1, 0, 0))
            .unwrap();
        let hours = if utc < change { 2 } else { 1 };
        FixedOffset::east_opt(hours * 3600).unwrap()
    }
}

impl Clock for BerlinClock {
    fn now(&self) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-18T10:00:00+02:00").unwrap()
    }

    fn to_local(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&Self::offset_at(at.naive_utc()))
    }

    fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        // summer reading first, so a repeated hour resolves to the earlier instant
        [2, 1].into_iter().find_map(|hours| {
            let offset = FixedOffset::east_opt(hours * 3600)?;
            let utc = *naive - Duration::hours(i64::from(hours));
            (Self::offset_at(utc) == offset)
                .then(|| offset.from_local_datetime(naive).single())
                .flatten()
        })
    }
}
