//! Records in, grid and labels out.

use serde::Serialize;

use crate::aggregate::aggregate;
use crate::calendar::CalendarService;
use crate::config::ResolvedConfig;
use crate::grid::{build_grid, Grid};
use crate::labels::{place_month_labels, MonthLabel};
use crate::record::RawRecord;

/// A fully built heatmap, ready for layout and rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heatmap {
    pub grid: Grid,
    pub labels: Vec<MonthLabel>,
}

/// Aggregate `records`, lay them out and place month labels.
pub fn build<'a, R, I, C>(records: I, config: &ResolvedConfig, calendar: &C) -> Heatmap
where
    R: RawRecord + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
    C: CalendarService + ?Sized,
{
    let days = aggregate(
        records,
        config.date_property.as_deref(),
        config.track_property.as_deref(),
        calendar,
    );
    let grid = build_grid(
        &days,
        config.start_date,
        config.end_date,
        config.tracks_property(),
        config.max_value,
        calendar,
    );
    let labels = place_month_labels(&grid, calendar);
    Heatmap { grid, labels }
}
