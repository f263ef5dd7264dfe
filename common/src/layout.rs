//! Square-cell geometry fitted to the container width.
//!
//! Pure arithmetic on the week count; never touches grid contents, so a
//! resize can relayout without rebuilding data.

use chrono::Weekday;
use serde::Serialize;

use crate::grid::DAYS_PER_WEEK;

pub const CELL_GAP: i64 = 3;
pub const DAY_LABEL_WIDTH: i64 = 20;
pub const CONTAINER_PADDING: i64 = 16;
pub const MIN_CELL_SIZE: i64 = 4;

/// Width left for the cell columns once the day-label column, one gap and
/// the container padding are taken out.
pub fn available_width(container_width: i64) -> i64 {
    container_width - DAY_LABEL_WIDTH - CELL_GAP - CONTAINER_PADDING
}

/// Integer cell edge length, at least [`MIN_CELL_SIZE`].
///
/// Returns `None` for an empty grid.
pub fn cell_size(available_width: i64, gap: i64, week_count: usize) -> Option<i64> {
    if week_count == 0 {
        return None;
    }
    let weeks = week_count as i64;
    let fitted = (available_width - gap * (weeks - 1)).div_euclid(weeks);
    Some(fitted.max(MIN_CELL_SIZE))
}

/// Everything the renderer needs to size the grid and the month row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridGeometry {
    pub cell_size: i64,
    pub week_count: usize,
    pub rows: usize,
    pub gap: i64,
    /// Left offset of the month-label row, aligning it with the first column.
    pub label_row_offset: i64,
}

impl GridGeometry {
    pub fn grid_width(&self) -> i64 {
        let weeks = self.week_count as i64;
        weeks * self.cell_size + (weeks - 1).max(0) * self.gap
    }

    pub fn grid_height(&self) -> i64 {
        let rows = self.rows as i64;
        rows * self.cell_size + (rows - 1) * self.gap
    }
}

/// Fit a grid of `week_count` columns into a container `container_width`
/// pixels wide.
pub fn fit(container_width: i64, week_count: usize) -> Option<GridGeometry> {
    let size = cell_size(available_width(container_width), CELL_GAP, week_count)?;
    Some(GridGeometry {
        cell_size: size,
        week_count,
        rows: DAYS_PER_WEEK,
        gap: CELL_GAP,
        label_row_offset: DAY_LABEL_WIDTH + CELL_GAP,
    })
}

/// Row captions for the day-label column; only Mon, Wed and Fri are named.
pub fn day_labels(week_start: Weekday) -> [&'static str; DAYS_PER_WEEK] {
    let mut day = week_start;
    std::array::from_fn(|_| {
        let label = match day {
            Weekday::Mon => "M",
            Weekday::Wed => "W",
            Weekday::Fri => "F",
            _ => "",
        };
        day = day.succ();
        label
    })
}
