//! Calendar arithmetic used by the grid builder and label placer.
//!
//! The core only talks to [`CalendarService`]; [`ChronoCalendar`] is the
//! default implementation on top of `chrono::NaiveDate`.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, Weekday};

/// A whole calendar day. Used as the aggregation and lookup key.
pub type CalendarDay = NaiveDate;

/// Date arithmetic, comparison and formatting at whole-day granularity.
pub trait CalendarService {
    /// First day of the week containing `day`.
    fn start_of_week(&self, day: CalendarDay) -> CalendarDay;

    /// Last day of the week containing `day`.
    fn end_of_week(&self, day: CalendarDay) -> CalendarDay;

    fn add_days(&self, day: CalendarDay, days: i64) -> CalendarDay;

    /// Lenient parse of a user- or record-supplied date string.
    fn parse_date(&self, raw: &str) -> Option<CalendarDay>;

    /// `YYYY-MM-DD`.
    fn format_key(&self, day: CalendarDay) -> String;

    /// Long form, e.g. `January 5, 2024`.
    fn format_long(&self, day: CalendarDay) -> String;

    /// Zero-based month (0 = January).
    fn month_index(&self, day: CalendarDay) -> u32;
}

/// [`CalendarService`] backed by chrono, with a configurable week start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronoCalendar {
    week_start: Weekday,
}

impl ChronoCalendar {
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Days since the start of the week, 0..=6.
    fn offset_in_week(&self, day: CalendarDay) -> u64 {
        let dow = day.weekday().num_days_from_monday();
        let start = self.week_start.num_days_from_monday();
        u64::from((7 + dow - start) % 7)
    }
}

/// Sunday-start weeks. With these, 2024-01-01..2024-01-07 spans two
/// columns; Monday-start weeks fit it in one.
impl Default for ChronoCalendar {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

impl CalendarService for ChronoCalendar {
    // Both saturate at the ends of the representable range.
    fn start_of_week(&self, day: CalendarDay) -> CalendarDay {
        day.checked_sub_days(Days::new(self.offset_in_week(day)))
            .unwrap_or(NaiveDate::MIN)
    }

    fn end_of_week(&self, day: CalendarDay) -> CalendarDay {
        day.checked_add_days(Days::new(6 - self.offset_in_week(day)))
            .unwrap_or(NaiveDate::MAX)
    }

    fn add_days(&self, day: CalendarDay, days: i64) -> CalendarDay {
        day.checked_add_signed(Duration::days(days)).unwrap_or(day)
    }

    fn parse_date(&self, raw: &str) -> Option<CalendarDay> {
        parse_lenient(raw)
    }

    fn format_key(&self, day: CalendarDay) -> String {
        day.format("%Y-%m-%d").to_string()
    }

    fn format_long(&self, day: CalendarDay) -> String {
        day.format("%B %-d, %Y").to_string()
    }

    fn month_index(&self, day: CalendarDay) -> u32 {
        day.month0()
    }
}

/// Parse a week-start name (`sunday`, `mon`, ...). Case-insensitive.
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    raw.trim().to_ascii_lowercase().parse::<Weekday>().ok()
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Accepts plain dates, naive date-times and RFC 3339 timestamps; the
/// time part is discarded. Dates whose week would run past the
/// representable range are rejected.
fn parse_lenient(raw: &str) -> Option<CalendarDay> {
    parse_any(raw).filter(|d| has_full_weeks_around(*d))
}

fn has_full_weeks_around(day: CalendarDay) -> bool {
    day.checked_sub_days(Days::new(7)).is_some() && day.checked_add_days(Days::new(7)).is_some()
}

fn parse_any(raw: &str) -> Option<CalendarDay> {
    let s = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
