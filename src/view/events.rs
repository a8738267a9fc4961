//! Calendar events
//!
//! One `GET /events` feeds two lists: every event in the sidebar, and
//! today's events as checkable tasks.

use super::{resolve_start, Clock, Effect, Listing, UiState};
use crate::api::{ApiResult, CalendarEvent};

pub const NO_EVENTS: &str = "No upcoming events";
pub const NO_EVENTS_TODAY: &str = "No events scheduled for today.";
pub const EVENTS_FAILED: &str = "Failed to load events";
pub const TOGGLE_FAILED: &str = "Failed to update task";
pub const DELETE_FAILED: &str = "Failed to delete event";

/// Sidebar line for one event
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub time: String,
    pub title: String,
}

/// Task-list entry for one of today's events
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub event_id: String,
    /// Summary exactly as the backend sent it, marker included
    pub summary: String,
    /// `<time> • <description>`
    pub meta: String,
    pub completed: bool,
}

impl TaskRow {
    pub fn is_checked(&self) -> bool {
        self.completed
    }

    pub fn is_struck_through(&self) -> bool {
        self.completed
    }

    /// Only completed tasks offer deletion
    pub fn can_delete(&self) -> bool {
        self.completed
    }
}

/// Both renderings of the last events fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsView {
    pub sidebar: Listing<EventRow>,
    pub today: Listing<TaskRow>,
}

/// Question asked before deleting a calendar event
pub fn delete_confirmation(summary: &str) -> String {
    format!("Are you sure you want to delete \"{}\"?", summary)
}

impl UiState {
    pub fn finish_fetch_events(
        &mut self,
        result: ApiResult<Vec<CalendarEvent>>,
        clock: &impl Clock,
    ) {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Error fetching events: {}", e);
                self.events.sidebar = Listing::Failed(EVENTS_FAILED.to_string());
                self.events.today = Listing::Failed(EVENTS_FAILED.to_string());
                return;
            }
        };

        let today = clock.now().date_naive();
        let mut sidebar = Vec::with_capacity(events.len());
        let mut tasks = Vec::new();

        for event in events {
            let start = event
                .start
                .as_ref()
                .and_then(|start| resolve_start(start, clock));
            let time = start.map(|s| s.time_label()).unwrap_or_default();

            sidebar.push(EventRow {
                time: time.clone(),
                title: event.summary.clone(),
            });

            if start.map(|s| s.local_date()) == Some(today) {
                let description = event
                    .description
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .unwrap_or("Google Calendar Event");
                tasks.push(TaskRow {
                    completed: event.is_completed(),
                    meta: format!("{} • {}", time, description),
                    event_id: event.id,
                    summary: event.summary,
                });
            }
        }

        tracing::debug!(total = sidebar.len(), today = tasks.len(), "rendered events");
        self.events.sidebar = Listing::from_items(sidebar, NO_EVENTS);
        self.events.today = Listing::from_items(tasks, NO_EVENTS_TODAY);
    }

    /// Settle `POST /mark_event_complete`
    pub fn finish_toggle_event(&mut self, event_id: &str, result: ApiResult<bool>) -> Vec<Effect> {
        match result {
            Ok(true) => vec![Effect::FetchEvents],
            Ok(false) => vec![Effect::Alert(TOGGLE_FAILED.to_string())],
            Err(e) => {
                tracing::error!("Error updating task {}: {}", event_id, e);
                vec![Effect::Alert(TOGGLE_FAILED.to_string())]
            }
        }
    }

    /// Settle `POST /delete_calendar_event`
    pub fn finish_delete_event(&mut self, event_id: &str, result: ApiResult<bool>) -> Vec<Effect> {
        match result {
            Ok(true) => vec![Effect::FetchEvents],
            Ok(false) => vec![Effect::Alert(DELETE_FAILED.to_string())],
            Err(e) => {
                tracing::error!("Error deleting event {}: {}", event_id, e);
                vec![Effect::Alert(DELETE_FAILED.to_string())]
            }
        }
    }
}
