//! Per-day aggregation of records.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{CalendarDay, CalendarService};
use crate::date_key::resolve_day_key;
use crate::record::{RawRecord, RecordId};

/// Everything recorded on one calendar day.
///
/// `representative` and `display_name` belong to the first record seen for
/// the day; later records only add to `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDay {
    pub day: CalendarDay,
    pub value: f64,
    pub representative: RecordId,
    pub display_name: String,
}

/// Day key → aggregate. A key appears at most once.
pub type DayMap = BTreeMap<CalendarDay, AggregatedDay>;

/// Numeric value of a raw track-property string.
///
/// `"true"` → 1, `"false"` → 0, otherwise a number; anything unparseable
/// counts as 0.
pub fn parse_track_value(raw: &str) -> f64 {
    match raw {
        "true" => 1.0,
        "false" => 0.0,
        other => other
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
    }
}

/// Group records by resolved day, summing their track values.
///
/// Without a track property every record contributes 0; intensity is
/// substituted later by the grid builder.
pub fn aggregate<'a, R, I, C>(
    records: I,
    date_property: Option<&str>,
    track_property: Option<&str>,
    calendar: &C,
) -> DayMap
where
    R: RawRecord + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
    C: CalendarService + ?Sized,
{
    let mut map = DayMap::new();
    let mut dropped = 0usize;

    for record in records {
        let Some(day) = resolve_day_key(record, date_property, calendar) else {
            debug!("No day key for {}, skipping", record.id());
            dropped += 1;
            continue;
        };

        let value = match track_property {
            Some(key) => record
                .property(key)
                .map(|raw| parse_track_value(&raw))
                .unwrap_or(0.0),
            None => 0.0,
        };

        match map.entry(day) {
            Entry::Occupied(mut e) => e.get_mut().value += value,
            Entry::Vacant(e) => {
                e.insert(AggregatedDay {
                    day,
                    value,
                    representative: record.id().clone(),
                    display_name: record.basename().to_string(),
                });
            }
        }
    }

    debug!("Aggregated {} day(s), dropped {dropped} record(s)", map.len());
    map
}
