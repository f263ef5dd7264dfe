//! Terminal and JSON renderings of a built heatmap.

use serde::Serialize;

use heatmap_common::color::CellFill;
use heatmap_common::grid::{Cell, Grid};
use heatmap_common::labels::MonthLabel;
use heatmap_common::layout::GridGeometry;
use heatmap_common::record::{RawRecord, RecordId};
use heatmap_common::tooltip::HoverText;
use heatmap_common::view::HeatmapView;

const GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

fn glyph(fill: CellFill) -> char {
    match fill {
        CellFill::Transparent => ' ',
        CellFill::Empty => GLYPHS[0],
        CellFill::Bucket(b) => GLYPHS[b.level() as usize],
    }
}

/// Month row, then one line per weekday; each week is two characters wide.
pub fn render_text<R: RawRecord>(view: &HeatmapView<R>) -> String {
    let grid = view.grid();
    if grid.is_empty() {
        return "(empty range)\n".to_string();
    }

    let label_width = 2;
    let mut out = String::new();

    let mut month_row = vec![' '; grid.week_count() * 2 + 1];
    for label in view.labels() {
        let at = (label.column - 1) * 2;
        for (i, ch) in label.text().chars().enumerate() {
            if let Some(slot) = month_row.get_mut(at + i) {
                *slot = ch;
            }
        }
    }
    out.push_str(&" ".repeat(label_width));
    out.extend(month_row.iter());
    out.truncate(out.trim_end_matches(' ').len());
    out.push('\n');

    for (row, day_label) in view.day_labels().iter().enumerate() {
        out.push_str(&format!("{day_label:>width$} ", width = label_width - 1));
        for week in &grid.weeks {
            out.push(glyph(view.fill(&week[row])));
            out.push(' ');
        }
        out.truncate(out.trim_end_matches(' ').len());
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
struct CellOut<'a> {
    date: String,
    in_range: bool,
    fill: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    hover: HoverText,
}

#[derive(Debug, Serialize)]
struct LabelOut {
    text: &'static str,
    column: usize,
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    weeks: Vec<Vec<CellOut<'a>>>,
    labels: Vec<LabelOut>,
    geometry: Option<GridGeometry>,
}

fn cell_out<'a, R: RawRecord>(view: &HeatmapView<R>, cell: &'a Cell) -> CellOut<'a> {
    let agg = cell.aggregated.as_ref();
    CellOut {
        date: cell.day.format("%Y-%m-%d").to_string(),
        in_range: cell.in_range,
        fill: view.fill(cell).css(),
        record: agg.map(|a| &a.representative),
        name: agg.map(|a| a.display_name.as_str()),
        value: agg.map(|a| a.value),
        hover: view.hover(cell),
    }
}

fn label_out(labels: &[MonthLabel]) -> Vec<LabelOut> {
    labels
        .iter()
        .map(|l| LabelOut { text: l.text(), column: l.column })
        .collect()
}

/// Everything a graphical renderer needs, as pretty-printed JSON.
pub fn render_json<R: RawRecord>(view: &HeatmapView<R>) -> serde_json::Result<String> {
    let grid: &Grid = view.grid();
    let snapshot = Snapshot {
        weeks: grid
            .weeks
            .iter()
            .map(|w| w.iter().map(|c| cell_out(view, c)).collect())
            .collect(),
        labels: label_out(view.labels()),
        geometry: view.geometry(),
    };
    serde_json::to_string_pretty(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use heatmap_common::config::HeatmapConfig;
    use heatmap_common::record::Note;
    use heatmap_common::view::Focus;

    fn january_view(notes: Vec<Note>) -> HeatmapView<Note> {
        let mut v = HeatmapView::new().with_today(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let cfg = HeatmapConfig {
            track_property: Some("reps".into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
            ..Default::default()
        };
        v.on_data_updated(notes, cfg, Focus::Nothing);
        v.on_resize(800);
        v
    }

    #[test]
    fn test_text_rendering() {
        let notes = vec![Note::new("a.md", "2024-01-03").with_property("reps", "10")];
        let text = render_text(&january_view(notes));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[0].trim_start().starts_with("Jan"));
        // Sunday 2023-12-31 is padding; Wednesday 2024-01-03 is full.
        assert!(lines[1].starts_with("  "));
        assert!(lines[4].contains('█'));
        assert!(lines[2].starts_with("M ·"));
    }

    #[test]
    fn test_empty_text_rendering() {
        let v: HeatmapView<Note> = HeatmapView::new();
        assert_eq!(render_text(&v), "(empty range)\n");
    }

    #[test]
    fn test_json_snapshot() {
        let notes = vec![Note::new("a.md", "2024-01-03").with_property("reps", "5")];
        let json = render_json(&january_view(notes)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["weeks"].as_array().unwrap().len(), 5);
        let cell = &value["weeks"][0][3];
        assert_eq!(cell["date"], "2024-01-03");
        assert_eq!(cell["record"], "a.md");
        assert_eq!(cell["value"], 5.0);
        assert_eq!(cell["fill"], "#40c463");
        assert_eq!(cell["hover"]["value_line"], "Value: 5");
        assert_eq!(value["labels"][0]["text"], "Jan");
        assert_eq!(value["geometry"]["week_count"], 5);
    }
}
