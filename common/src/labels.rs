//! Month labels along the top of the grid.

use serde::Serialize;

use crate::calendar::CalendarService;
use crate::grid::Grid;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Minimum column distance between two placed labels.
pub const MIN_LABEL_SPACING: usize = 2;

/// A month name anchored to a 1-based grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    /// 0 = January.
    pub month_index: u32,
    pub column: usize,
}

impl MonthLabel {
    pub fn text(&self) -> &'static str {
        MONTH_NAMES.get(self.month_index as usize).copied().unwrap_or("?")
    }
}

/// One candidate per column whose first in-range day starts a new month.
pub fn month_label_candidates<C>(grid: &Grid, calendar: &C) -> Vec<MonthLabel>
where
    C: CalendarService + ?Sized,
{
    let mut last_month = None;
    let mut labels = Vec::new();

    for (w, week) in grid.weeks.iter().enumerate() {
        let Some(cell) = week.iter().find(|c| c.in_range) else {
            continue;
        };
        let month = calendar.month_index(cell.day);
        if last_month != Some(month) {
            labels.push(MonthLabel {
                month_index: month,
                column: w + 1,
            });
            last_month = Some(month);
        }
    }
    labels
}

/// Drop candidates that would crowd the last kept label.
pub fn space_labels(candidates: &[MonthLabel]) -> Vec<MonthLabel> {
    let mut kept: Vec<MonthLabel> = Vec::with_capacity(candidates.len());
    for label in candidates {
        match kept.last() {
            Some(prev) if label.column < prev.column + MIN_LABEL_SPACING => continue,
            _ => kept.push(*label),
        }
    }
    kept
}

pub fn place_month_labels<C>(grid: &Grid, calendar: &C) -> Vec<MonthLabel>
where
    C: CalendarService + ?Sized,
{
    space_labels(&month_label_candidates(grid, calendar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DayMap;
    use crate::calendar::ChronoCalendar;
    use crate::grid::build_grid;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn label(month_index: u32, column: usize) -> MonthLabel {
        MonthLabel { month_index, column }
    }

    #[test]
    fn test_full_year_labels() {
        let cal = ChronoCalendar::default();
        let grid = build_grid(&DayMap::new(), day(2024, 1, 1), day(2024, 12, 31), false, 10.0, &cal);
        let labels = place_month_labels(&grid, &cal);

        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], label(0, 1));
        assert_eq!(labels[0].text(), "Jan");
        assert_eq!(labels[11].text(), "Dec");
        for pair in labels.windows(2) {
            assert!(pair[1].column >= pair[0].column + MIN_LABEL_SPACING);
        }
    }

    #[test]
    fn test_candidate_uses_first_in_range_day() {
        let cal = ChronoCalendar::default();
        // First display week starts 2024-01-28; first in-range day is Feb 1.
        let grid = build_grid(&DayMap::new(), day(2024, 2, 1), day(2024, 2, 20), false, 10.0, &cal);
        let labels = month_label_candidates(&grid, &cal);
        assert_eq!(labels, vec![label(1, 1)]);
    }

    #[test]
    fn test_spacing_measured_from_last_kept() {
        let candidates = [label(0, 1), label(1, 2), label(2, 3), label(3, 4), label(4, 8)];
        let kept = space_labels(&candidates);
        assert_eq!(kept, vec![label(0, 1), label(2, 3), label(4, 8)]);
    }

    #[test]
    fn test_first_always_kept() {
        assert_eq!(space_labels(&[label(5, 1)]), vec![label(5, 1)]);
        assert!(space_labels(&[]).is_empty());
    }

    #[test]
    fn test_empty_grid_has_no_labels() {
        let cal = ChronoCalendar::default();
        assert!(place_month_labels(&Grid::default(), &cal).is_empty());
    }
}
