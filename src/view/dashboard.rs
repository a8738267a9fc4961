//! Dashboard
//!
//! Greeting, counters, the quiz-derived knowledge profile and the next
//! few calendar events, all from one `GET /dashboard_stats`.

use chrono::{Datelike, Timelike};

use super::{resolve_start, Clock, Listing, UiState};
use crate::api::{ApiResult, CalendarEvent, DashboardStats, KnowledgeEntry};

pub const NO_QUIZ_DATA: &str = "No quiz data yet. Take a quiz to see your stats!";
pub const NO_UPCOMING: &str = "No upcoming events.";

/// Salutation for a local hour of day
pub fn greeting_for(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

/// One labelled progress bar of the knowledge profile
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBar {
    pub topic: String,
    /// Level rounded half-up, e.g. `67%`
    pub label: String,
    /// Raw level, used unrounded as the bar width
    pub width: f64,
}

impl KnowledgeBar {
    pub fn width_style(&self) -> String {
        format!("width: {}%", self.width)
    }
}

impl From<KnowledgeEntry> for KnowledgeBar {
    fn from(entry: KnowledgeEntry) -> Self {
        Self {
            label: format!("{}%", (entry.level + 0.5).floor() as i64),
            width: entry.level,
            topic: entry.topic,
        }
    }
}

/// Month/day box of an upcoming event
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingRow {
    pub month: String,
    pub day: u32,
    pub time: String,
    pub title: String,
}

impl UpcomingRow {
    fn from_event(event: &CalendarEvent, clock: &impl Clock) -> Option<Self> {
        let start = resolve_start(event.start.as_ref()?, clock)?;
        let date = start.local_date();
        let title = if event.summary.is_empty() {
            "No Title".to_string()
        } else {
            event.summary.clone()
        };
        Some(Self {
            month: date.format("%b").to_string(),
            day: date.day(),
            time: start.time_label(),
            title,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub greeting: String,
    /// Long form, e.g. `Sunday, October 18, 2026`
    pub date: String,
    pub total_chats: u64,
    pub total_files: u64,
    pub upcoming_events_count: u64,
    pub knowledge: Listing<KnowledgeBar>,
    pub upcoming: Listing<UpcomingRow>,
}

impl DashboardView {
    pub fn render(stats: DashboardStats, user_name: &str, clock: &impl Clock) -> Self {
        let now = clock.now();
        let knowledge = stats
            .knowledge_profile
            .into_iter()
            .map(KnowledgeBar::from)
            .collect();

        let upcoming: Vec<UpcomingRow> = stats
            .upcoming_events
            .iter()
            .flatten()
            .filter_map(|event| UpcomingRow::from_event(event, clock))
            .collect();
        let skipped = stats.upcoming_events.len() - upcoming.len();
        if skipped > 0 {
            tracing::debug!(skipped, "skipped upcoming events without a usable start");
        }

        Self {
            greeting: format!("{}, {}!", greeting_for(now.hour()), user_name),
            date: now.format("%A, %B %-d, %Y").to_string(),
            total_chats: stats.total_chats,
            total_files: stats.total_files,
            upcoming_events_count: stats.upcoming_events_count,
            knowledge: Listing::from_items(knowledge, NO_QUIZ_DATA),
            upcoming: Listing::from_items(upcoming, NO_UPCOMING),
        }
    }
}

impl UiState {
    /// A failed fetch keeps whatever was rendered before
    pub fn finish_load_dashboard(
        &mut self,
        result: ApiResult<DashboardStats>,
        clock: &impl Clock,
    ) {
        match result {
            Ok(stats) => {
                self.dashboard = Some(DashboardView::render(stats, &self.user_name, clock));
            }
            Err(e) => tracing::error!("Error loading dashboard: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, EventStart};
    use crate::testing::{BerlinClock, FixedClock};

    fn at(rfc3339: &str) -> FixedClock {
        FixedClock::at(rfc3339)
    }

    #[test]
    fn test_greeting_cutoffs() {
        assert_eq!(greeting_for(0), "Good morning");
        assert_eq!(greeting_for(11), "Good morning");
        assert_eq!(greeting_for(12), "Good afternoon");
        assert_eq!(greeting_for(16), "Good afternoon");
        assert_eq!(greeting_for(17), "Good evening");
        assert_eq!(greeting_for(23), "Good evening");
    }

    #[test]
    fn test_render_header_and_counters() {
        let stats = DashboardStats {
            total_chats: 4,
            total_files: 2,
            upcoming_events_count: 9,
            ..Default::default()
        };
        let view = DashboardView::render(stats, "Asha", &at("2026-10-18T13:00:00+01:00"));

        assert_eq!(view.greeting, "Good afternoon, Asha!");
        assert_eq!(view.date, "Sunday, October 18, 2026");
        assert_eq!((view.total_chats, view.total_files, view.upcoming_events_count), (4, 2, 9));
        assert_eq!(view.knowledge.placeholder(), Some(NO_QUIZ_DATA));
        assert_eq!(view.upcoming.placeholder(), Some(NO_UPCOMING));
    }

    #[test]
    fn test_knowledge_bars_keep_order_and_raw_width() {
        let stats = DashboardStats {
            knowledge_profile: vec![
                KnowledgeEntry { topic: "Rust".to_string(), level: 66.5 },
                KnowledgeEntry { topic: "SQL".to_string(), level: 12.4 },
            ],
            ..Default::default()
        };
        let view = DashboardView::render(stats, "User", &at("2026-10-18T08:00:00Z"));

        let bars = view.knowledge.items();
        assert_eq!(bars[0].topic, "Rust");
        assert_eq!(bars[0].label, "67%");
        assert_eq!(bars[0].width_style(), "width: 66.5%");
        assert_eq!(bars[1].label, "12%");
    }

    #[test]
    fn test_upcoming_skips_unusable_events() {
        let dated = CalendarEvent {
            summary: String::new(),
            start: Some(EventStart {
                date_time: Some("2026-11-03T15:30:00Z".to_string()),
                date: None,
            }),
            ..Default::default()
        };
        let garbled = CalendarEvent {
            summary: "Garbled".to_string(),
            start: Some(EventStart { date_time: Some("tomorrow".to_string()), date: None }),
            ..Default::default()
        };
        let stats = DashboardStats {
            upcoming_events: vec![None, Some(garbled), Some(dated), Some(CalendarEvent::default())],
            ..Default::default()
        };

        let view = DashboardView::render(stats, "User", &at("2026-10-18T08:00:00Z"));

        let rows = view.upcoming.items();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, "Nov");
        assert_eq!(rows[0].day, 3);
        assert_eq!(rows[0].time, "03:30 PM");
        assert_eq!(rows[0].title, "No Title");
    }

    #[test]
    fn test_failed_fetch_keeps_previous_render() {
        let mut state = UiState::new("Asha");
        let now = at("2026-10-18T19:00:00Z");
        state.finish_load_dashboard(Ok(DashboardStats { total_chats: 1, ..Default::default() }), &now);
        state.finish_load_dashboard(Err(ApiError::Transport("offline".to_string())), &now);

        let view = state.dashboard.as_ref().unwrap();
        assert_eq!(view.total_chats, 1);
        assert_eq!(view.greeting, "Good evening, Asha!");
    }

    #[test]
    fn test_upcoming_boxes_use_offset_of_event_day() {
        let late = CalendarEvent {
            summary: "Night train".to_string(),
            start: Some(EventStart {
                date_time: Some("2026-10-25T22:30:00Z".to_string()),
                date: None,
            }),
            ..Default::default()
        };
        let stats = DashboardStats { upcoming_events: vec![Some(late)], ..Default::default() };

        let view = DashboardView::render(stats, "User", &BerlinClock);

        let row = &view.upcoming.items()[0];
        assert_eq!((row.month.as_str(), row.day), ("Oct", 25));
        assert_eq!(row.time, "11:30 PM");
    }
}
