//! Local time
//!
//! "Today" and greeting decisions use the device's local time. The
//! [`Clock`] seam lets the terminal, the browser and tests supply it.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::api::EventStart;

/// Source of the current local time and of the local time zone.
///
/// Conversions use the offset in force at the converted instant, which
/// differs from the offset of [`Clock::now`] across a daylight-saving change.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Local wall-clock reading of an instant
    fn to_local(&self, at: DateTime<Utc>) -> DateTime<FixedOffset>;

    /// Instant of a local wall-clock time. The earlier reading wins for a
    /// time repeated by a backward change; a skipped time has none.
    fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>>;
}

/// Device clock in the device's time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    fn to_local(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&Local).fixed_offset()
    }

    fn from_local(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        Local
            .from_local_datetime(naive)
            .earliest()
            .map(|at| at.fixed_offset())
    }
}

/// When an event starts, as seen from the local time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    At(DateTime<FixedOffset>),
    AllDay(NaiveDate),
}

impl EventTime {
    pub fn local_date(&self) -> NaiveDate {
        match self {
            EventTime::At(at) => at.date_naive(),
            EventTime::AllDay(date) => *date,
        }
    }

    /// Short wall-clock label, e.g. `09:30 AM`
    pub fn time_label(&self) -> String {
        match self {
            EventTime::At(at) => at.format("%I:%M %p").to_string(),
            EventTime::AllDay(_) => "All day".to_string(),
        }
    }
}

/// Resolve an event start into `clock`'s local time. `dateTime` wins over
/// `date`; timestamps without an offset are read as local wall-clock time.
pub fn resolve_start(start: &EventStart, clock: &impl Clock) -> Option<EventTime> {
    if let Some(raw) = start.date_time.as_deref().filter(|s| !s.is_empty()) {
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(EventTime::At(clock.to_local(at.with_timezone(&Utc))));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .ok()?;
        return clock.from_local(&naive).map(EventTime::At);
    }

    let raw = start.date.as_deref().filter(|s| !s.is_empty())?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(EventTime::AllDay)
}
