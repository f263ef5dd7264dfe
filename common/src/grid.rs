//! Week-aligned grid construction.
//!
//! The display window runs from the start of the week containing
//! `start_date` up to and including the end of the week containing
//! `end_date`. Each column is one week of exactly seven cells.

use serde::Serialize;

use crate::aggregate::{AggregatedDay, DayMap};
use crate::calendar::{CalendarDay, CalendarService};

pub const DAYS_PER_WEEK: usize = 7;

/// One day in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub day: CalendarDay,
    pub aggregated: Option<AggregatedDay>,
    pub in_range: bool,
}

impl Cell {
    /// Value used for coloring, if the day has an entry.
    pub fn value(&self) -> Option<f64> {
        self.aggregated.as_ref().map(|a| a.value)
    }
}

/// Seven cells; index = day offset from the display start-of-week.
pub type WeekColumn = [Cell; DAYS_PER_WEEK];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grid {
    pub weeks: Vec<WeekColumn>,
}

impl Grid {
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.weeks.iter().flat_map(|w| w.iter())
    }
}

/// Lay the day map out into week columns.
///
/// When `tracks_property` is false, any day with an entry is shown at
/// `max_value`. An inverted range (`start_date > end_date`) yields an
/// empty grid.
pub fn build_grid<C>(
    days: &DayMap,
    start_date: CalendarDay,
    end_date: CalendarDay,
    tracks_property: bool,
    max_value: f64,
    calendar: &C,
) -> Grid
where
    C: CalendarService + ?Sized,
{
    if start_date > end_date {
        return Grid::default();
    }

    let display_start = calendar.start_of_week(start_date);
    // Exclusive bound: the day after the end of the last week.
    let display_end = calendar.add_days(calendar.end_of_week(end_date), 1);

    let mut weeks = Vec::new();
    let mut cursor = display_start;
    while cursor < display_end {
        let week_start = cursor;
        let week: WeekColumn = std::array::from_fn(|dow| {
            let day = calendar.add_days(week_start, dow as i64);
            let in_range = day >= start_date && day <= end_date;
            let aggregated = if in_range {
                days.get(&day).map(|entry| {
                    if tracks_property {
                        entry.clone()
                    } else {
                        AggregatedDay {
                            value: max_value,
                            ..entry.clone()
                        }
                    }
                })
            } else {
                None
            };
            Cell {
                day,
                aggregated,
                in_range,
            }
        });
        weeks.push(week);

        let next = calendar.add_days(cursor, DAYS_PER_WEEK as i64);
        if next <= cursor {
            // Date overflow at the far end of the calendar.
            break;
        }
        cursor = next;
    }

    Grid { weeks }
}
