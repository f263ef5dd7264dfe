//! Hover text for a cell. Positioning and display belong to the renderer.

use serde::Serialize;

use crate::calendar::CalendarService;
use crate::grid::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverText {
    /// e.g. `January 5, 2024`
    pub date_line: String,
    /// `Value: {n}`, only for cells with an entry.
    pub value_line: Option<String>,
}

impl HoverText {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.date_line.as_str()).chain(self.value_line.as_deref())
    }
}

pub fn hover_text<C>(cell: &Cell, calendar: &C) -> HoverText
where
    C: CalendarService + ?Sized,
{
    HoverText {
        date_line: calendar.format_long(cell.day),
        value_line: cell.value().map(|v| format!("Value: {v}")),
    }
}
