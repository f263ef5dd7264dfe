//! Configuration – view options plus a `KEY=VALUE` file loader for hosts.
//!
//! Every option is optional. Bad values fall back to defaults silently;
//! only failing to read the file itself is an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Months, Weekday};
use tracing::info;

use crate::calendar::{parse_weekday, CalendarDay, CalendarService, ChronoCalendar};

pub const DEFAULT_MIN_VALUE: f64 = 0.0;
pub const DEFAULT_MAX_VALUE: f64 = 10.0;

/// Heatmap view options as the user entered them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapConfig {
    /// Property holding the record's date; filename fallback when unset.
    pub date_property: Option<String>,
    /// Property summed per day; presence-only when unset.
    pub track_property: Option<String>,
    /// Free text, `YYYY-MM-DD` expected.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// `WEEK_START`; Sunday when unset. Use Monday for a Monday-to-Sunday
    /// range such as 2024-01-01..2024-01-07 to fit in a single column.
    pub week_start: Option<Weekday>,
}

/// Options with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub date_property: Option<String>,
    pub track_property: Option<String>,
    pub start_date: CalendarDay,
    pub end_date: CalendarDay,
    pub min_value: f64,
    pub max_value: f64,
    pub week_start: Weekday,
}

impl HeatmapConfig {
    /// Apply defaults relative to `today`.
    ///
    /// The range defaults to the year ending today. A zero `max_value` is
    /// treated as unset.
    pub fn resolve<C>(&self, today: CalendarDay, calendar: &C) -> ResolvedConfig
    where
        C: CalendarService + ?Sized,
    {
        let parse = |raw: &Option<String>| raw.as_deref().and_then(|s| calendar.parse_date(s));
        let start_date = parse(&self.start_date).unwrap_or_else(|| one_year_before(today));
        let end_date = parse(&self.end_date).unwrap_or(today);

        ResolvedConfig {
            date_property: non_empty(&self.date_property),
            track_property: non_empty(&self.track_property),
            start_date,
            end_date,
            min_value: self
                .min_value
                .filter(|v| v.is_finite())
                .unwrap_or(DEFAULT_MIN_VALUE),
            max_value: self
                .max_value
                .filter(|v| v.is_finite() && *v != 0.0)
                .unwrap_or(DEFAULT_MAX_VALUE),
            week_start: self.week_start.unwrap_or(Weekday::Sun),
        }
    }
}

impl ResolvedConfig {
    pub fn calendar(&self) -> ChronoCalendar {
        ChronoCalendar::new(self.week_start)
    }

    pub fn tracks_property(&self) -> bool {
        self.track_property.is_some()
    }
}

fn one_year_before(day: CalendarDay) -> CalendarDay {
    day.checked_sub_months(Months::new(12)).unwrap_or(day)
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ─── Host configuration file ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Host settings read from `heatmap.conf`.
#[derive(Debug, Clone)]
pub struct Config {
    pub heatmap: HeatmapConfig,
    /// Directory of Markdown notes, or a `.json` record file.
    pub source: PathBuf,
    pub output: OutputFormat,
    /// Container width in pixels used for the layout.
    pub container_width: i64,
}

impl Config {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "/etc/heatmap/heatmap.conf"
    }
}

/// Parse a `KEY=VALUE` configuration file.
///
/// Lines starting with `#` are comments.  Values may be optionally
/// double-quoted.  Unknown keys are silently ignored.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;

    let config = from_map(&parse_conf(&text));
    info!("Loaded config from {}", path.display());
    Ok(config)
}

fn from_map(map: &HashMap<String, String>) -> Config {
    let get = |key: &str| -> Option<String> { map.get(key).filter(|v| !v.is_empty()).cloned() };
    let get_f64 = |key: &str| -> Option<f64> { get(key).and_then(|v| v.parse().ok()) };

    Config {
        heatmap: HeatmapConfig {
            date_property: get("DATE_PROPERTY"),
            track_property: get("TRACK_PROPERTY"),
            start_date: get("START_DATE"),
            end_date: get("END_DATE"),
            min_value: get_f64("MIN_VALUE"),
            max_value: get_f64("MAX_VALUE"),
            week_start: get("WEEK_START").and_then(|v| parse_weekday(&v)),
        },
        source: PathBuf::from(get("SOURCE").unwrap_or_else(|| ".".into())),
        output: get("OUTPUT")
            .and_then(|v| OutputFormat::parse(&v))
            .unwrap_or_default(),
        container_width: get("CONTAINER_WIDTH")
            .and_then(|v| v.parse().ok())
            .unwrap_or(800),
    }
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_conf() {
        let text = r#"
# comment
TRACK_PROPERTY="pushups"
START_DATE=2024-01-01
MAX_VALUE=25
OUTPUT=json
"#;
        let map = parse_conf(text);
        assert_eq!(map["TRACK_PROPERTY"], "pushups");
        assert_eq!(map["START_DATE"], "2024-01-01");

        let config = from_map(&map);
        assert_eq!(config.heatmap.track_property.as_deref(), Some("pushups"));
        assert_eq!(config.heatmap.max_value, Some(25.0));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.container_width, 800);
    }

    #[test]
    fn test_resolve_defaults() {
        let cal = ChronoCalendar::default();
        let today = day(2024, 6, 15);
        let r = HeatmapConfig::default().resolve(today, &cal);
        assert_eq!(r.start_date, day(2023, 6, 15));
        assert_eq!(r.end_date, today);
        assert_eq!(r.min_value, 0.0);
        assert_eq!(r.max_value, 10.0);
        assert_eq!(r.week_start, Weekday::Sun);
        assert!(!r.tracks_property());
    }

    #[test]
    fn test_invalid_dates_fall_back() {
        let cal = ChronoCalendar::default();
        let today = day(2024, 2, 29);
        let cfg = HeatmapConfig {
            start_date: Some("last spring".into()),
            end_date: Some("2024-02-31".into()),
            ..Default::default()
        };
        let r = cfg.resolve(today, &cal);
        assert_eq!(r.start_date, day(2023, 2, 28));
        assert_eq!(r.end_date, today);
    }

    #[test]
    fn test_value_range_fallbacks() {
        let cal = ChronoCalendar::default();
        let today = day(2024, 1, 1);
        let cfg = HeatmapConfig {
            min_value: Some(f64::NAN),
            max_value: Some(0.0),
            track_property: Some("  ".into()),
            ..Default::default()
        };
        let r = cfg.resolve(today, &cal);
        assert_eq!(r.min_value, 0.0);
        assert_eq!(r.max_value, 10.0);
        assert_eq!(r.track_property, None);
    }

    #[test]
    fn test_load_file() {
        let dir = std::env::temp_dir().join("heatmap_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("heatmap.conf");
        std::fs::write(&path, "SOURCE=/vault\nWEEK_START=monday\nCONTAINER_WIDTH=1200\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.source, PathBuf::from("/vault"));
        assert_eq!(config.heatmap.week_start, Some(Weekday::Mon));
        assert_eq!(config.container_width, 1200);
        assert!(load(&dir.join("missing.conf")).is_err());
    }
}
