//! Renderer-side state for one mounted heatmap.
//!
//! Owns the latest records and options, the built heatmap and its
//! geometry. Data changes rebuild everything; resizes only relayout.
//! A data change that arrives while the user is typing into a text
//! option is held back until focus leaves the text input.

use chrono::{Local, Weekday};
use tracing::debug;

use crate::calendar::{CalendarDay, ChronoCalendar};
use crate::color::{cell_fill, CellFill};
use crate::config::{HeatmapConfig, ResolvedConfig};
use crate::grid::{Cell, Grid};
use crate::labels::MonthLabel;
use crate::layout::{self, GridGeometry};
use crate::pipeline::{self, Heatmap};
use crate::record::RawRecord;
use crate::tooltip::{hover_text, HoverText};

/// What currently holds (or is about to receive) input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TextInput,
    Other,
    Nothing,
}

impl Focus {
    fn is_text_input(self) -> bool {
        self == Focus::TextInput
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Rebuilt,
    Deferred,
}

pub struct HeatmapView<R> {
    records: Vec<R>,
    config: HeatmapConfig,
    resolved: Option<ResolvedConfig>,
    heatmap: Heatmap,
    container_width: Option<i64>,
    geometry: Option<GridGeometry>,
    pending_update: bool,
    today: Option<CalendarDay>,
}

impl<R> Default for HeatmapView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> HeatmapView<R> {
    /// An empty view: no cells until the first data update.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            config: HeatmapConfig::default(),
            resolved: None,
            heatmap: Heatmap::default(),
            container_width: None,
            geometry: None,
            pending_update: false,
            today: None,
        }
    }

    /// Fix "today" for date defaulting instead of reading the local clock.
    pub fn with_today(mut self, today: CalendarDay) -> Self {
        self.today = Some(today);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.heatmap.grid
    }

    pub fn labels(&self) -> &[MonthLabel] {
        &self.heatmap.labels
    }

    pub fn heatmap(&self) -> &Heatmap {
        &self.heatmap
    }

    pub fn geometry(&self) -> Option<GridGeometry> {
        self.geometry
    }

    pub fn has_pending_update(&self) -> bool {
        self.pending_update
    }

    pub fn resolved_config(&self) -> Option<&ResolvedConfig> {
        self.resolved.as_ref()
    }

    /// `(text, column)` pairs for the month row.
    pub fn label_texts(&self) -> Vec<(&'static str, usize)> {
        self.heatmap
            .labels
            .iter()
            .map(|l| (l.text(), l.column))
            .collect()
    }

    pub fn day_labels(&self) -> [&'static str; 7] {
        layout::day_labels(self.week_start())
    }

    pub fn fill(&self, cell: &Cell) -> CellFill {
        match &self.resolved {
            Some(r) => cell_fill(cell, r.min_value, r.max_value),
            None => CellFill::Transparent,
        }
    }

    pub fn hover(&self, cell: &Cell) -> HoverText {
        hover_text(cell, &self.calendar())
    }

    /// Container resized: recompute geometry against the current grid.
    pub fn on_resize(&mut self, container_width: i64) -> Option<GridGeometry> {
        self.container_width = Some(container_width);
        self.relayout();
        self.geometry
    }

    fn relayout(&mut self) {
        self.geometry = self
            .container_width
            .and_then(|w| layout::fit(w, self.heatmap.grid.week_count()));
    }

    fn week_start(&self) -> Weekday {
        self.resolved
            .as_ref()
            .map(|r| r.week_start)
            .unwrap_or(Weekday::Sun)
    }

    fn calendar(&self) -> ChronoCalendar {
        ChronoCalendar::new(self.week_start())
    }

    fn today(&self) -> CalendarDay {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl<R: RawRecord> HeatmapView<R> {
    /// Data or options changed.
    ///
    /// The new state is always stored; the rebuild is deferred while a
    /// text input has focus.
    pub fn on_data_updated(
        &mut self,
        records: Vec<R>,
        config: HeatmapConfig,
        focus: Focus,
    ) -> UpdateOutcome {
        self.records = records;
        self.config = config;

        if focus.is_text_input() {
            debug!("Text input focused, deferring heatmap rebuild");
            self.pending_update = true;
            return UpdateOutcome::Deferred;
        }
        self.rebuild();
        UpdateOutcome::Rebuilt
    }

    /// Focus left `from` for `to`. Runs a deferred rebuild when leaving a
    /// text input for anything that is not one. Returns whether it did.
    pub fn on_focus_out(&mut self, from: Focus, to: Focus) -> bool {
        if !self.pending_update || !from.is_text_input() || to.is_text_input() {
            return false;
        }
        self.pending_update = false;
        self.rebuild();
        true
    }

    /// Rebuild from stored records and options, then relayout.
    pub fn rebuild(&mut self) {
        let base = ChronoCalendar::new(self.config.week_start.unwrap_or(Weekday::Sun));
        let resolved = self.config.resolve(self.today(), &base);
        let calendar = resolved.calendar();

        self.heatmap = pipeline::build(&self.records, &resolved, &calendar);
        debug!(
            "Rebuilt heatmap: {} week(s), {} label(s)",
            self.heatmap.grid.week_count(),
            self.heatmap.labels.len()
        );
        self.resolved = Some(resolved);
        self.relayout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Note;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> HeatmapConfig {
        HeatmapConfig {
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
            ..Default::default()
        }
    }

    fn view() -> HeatmapView<Note> {
        HeatmapView::new().with_today(day(2024, 2, 1))
    }

    #[test]
    fn test_unbuilt_view_is_empty() {
        let mut v = view();
        assert!(v.grid().is_empty());
        assert!(v.labels().is_empty());
        assert_eq!(v.on_resize(800), None);
    }

    #[test]
    fn test_immediate_rebuild() {
        let mut v = view();
        let outcome = v.on_data_updated(vec![Note::new("a.md", "2024-01-10")], january(), Focus::Other);
        assert_eq!(outcome, UpdateOutcome::Rebuilt);
        assert_eq!(v.grid().week_count(), 5);
        assert_eq!(v.label_texts(), vec![("Jan", 1)]);

        let cell = v.grid().cells().find(|c| c.day == day(2024, 1, 10)).unwrap();
        assert_eq!(v.fill(cell), CellFill::Bucket(crate::color::ColorBucket::MAX));
        assert_eq!(v.hover(cell).value_line.as_deref(), Some("Value: 10"));
    }

    #[test]
    fn test_deferred_until_focus_leaves_text() {
        let mut v = view();
        v.on_data_updated(Vec::new(), january(), Focus::Nothing);
        assert_eq!(v.grid().week_count(), 5);

        let feb = HeatmapConfig {
            end_date: Some("2024-02-29".into()),
            ..january()
        };
        let outcome = v.on_data_updated(Vec::new(), feb, Focus::TextInput);
        assert_eq!(outcome, UpdateOutcome::Deferred);
        assert!(v.has_pending_update());
        assert_eq!(v.grid().week_count(), 5);

        // Tabbing between text inputs keeps it pending.
        assert!(!v.on_focus_out(Focus::TextInput, Focus::TextInput));
        // Focus moving between non-text targets is irrelevant.
        assert!(!v.on_focus_out(Focus::Other, Focus::Nothing));
        assert!(v.has_pending_update());

        assert!(v.on_focus_out(Focus::TextInput, Focus::Other));
        assert!(!v.has_pending_update());
        assert_eq!(v.grid().week_count(), 9);

        // Fires exactly once.
        assert!(!v.on_focus_out(Focus::TextInput, Focus::Nothing));
    }

    #[test]
    fn test_resize_only_relayouts() {
        let mut v = view();
        v.on_data_updated(vec![Note::new("a.md", "2024-01-10")], january(), Focus::Other);
        let before = v.grid().clone();

        let narrow = v.on_resize(200).unwrap();
        let wide = v.on_resize(1200).unwrap();
        assert!(wide.cell_size > narrow.cell_size);
        assert_eq!(wide.week_count, 5);
        assert_eq!(v.grid(), &before);
    }

    #[test]
    fn test_rebuild_keeps_last_width() {
        let mut v = view();
        v.on_resize(839);
        assert_eq!(v.geometry(), None);
        v.on_data_updated(Vec::new(), january(), Focus::Other);
        assert_eq!(v.geometry().map(|g| g.week_count), Some(5));
    }

    #[test]
    fn test_out_of_range_config_dates_fall_back() {
        let mut v = view();
        let cfg = HeatmapConfig {
            start_date: Some("2024-01-01".into()),
            end_date: Some("+262142-12-31".into()),
            ..Default::default()
        };
        assert_eq!(v.on_data_updated(Vec::new(), cfg, Focus::Other), UpdateOutcome::Rebuilt);
        assert_eq!(v.resolved_config().map(|r| r.end_date), Some(day(2024, 2, 1)));
        assert_eq!(v.grid().week_count(), 5);
    }

    #[test]
    fn test_monday_week_start() {
        let mut v = view();
        let cfg = HeatmapConfig {
            week_start: Some(Weekday::Mon),
            ..january()
        };
        v.on_data_updated(Vec::new(), cfg, Focus::Other);
        assert_eq!(v.grid().weeks[0][0].day, day(2024, 1, 1));
        assert_eq!(v.day_labels()[0], "M");
    }
}
