//! Day-key resolution for a single record.
//!
//! Order, first hit wins:
//! 1. the configured date property, if present and parseable;
//! 2. a `YYYY-MM-DD` substring of the basename;
//! 3. a `MM-DD-YYYY` substring of the basename.
//!
//! The first `YYYY-MM-DD`-shaped substring decides on its own: if it is not
//! a real date the record has no key, even when a `MM-DD-YYYY` date
//! follows. A record with no key is dropped by the aggregator.

use chrono::NaiveDate;

use crate::calendar::{CalendarDay, CalendarService};
use crate::record::RawRecord;

/// Resolve the calendar day a record belongs to.
pub fn resolve_day_key<R, C>(
    record: &R,
    date_property: Option<&str>,
    calendar: &C,
) -> Option<CalendarDay>
where
    R: RawRecord + ?Sized,
    C: CalendarService + ?Sized,
{
    if let Some(key) = date_property {
        if let Some(day) = record.property(key).and_then(|v| calendar.parse_date(&v)) {
            return Some(day);
        }
    }

    let basename = record.basename();
    if let Some(raw) = find_pattern(basename.as_bytes(), &[4, 2, 2]) {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    }
    find_mdy_date(basename)
}

/// First `\d{2}-\d{2}-\d{4}` substring, parsed as month-day-year.
fn find_mdy_date(s: &str) -> Option<CalendarDay> {
    let raw = find_pattern(s.as_bytes(), &[2, 2, 4])?;
    NaiveDate::parse_from_str(raw, "%m-%d-%Y").ok()
}

/// Leftmost substring made of dash-separated digit groups of the given
/// widths. Not anchored: surrounding digits are allowed.
fn find_pattern<'a>(bytes: &'a [u8], groups: &[usize]) -> Option<&'a str> {
    let len = groups.iter().sum::<usize>() + groups.len() - 1;
    if bytes.len() < len {
        return None;
    }
    (0..=bytes.len() - len).find_map(|start| {
        let window = &bytes[start..start + len];
        let mut pos = 0;
        for (i, &width) in groups.iter().enumerate() {
            if i > 0 {
                if window[pos] != b'-' {
                    return None;
                }
                pos += 1;
            }
            if !window[pos..pos + width].iter().all(u8::is_ascii_digit) {
                return None;
            }
            pos += width;
        }
        // Window is pure ASCII, so this never splits a code point.
        std::str::from_utf8(window).ok()
    })
}
