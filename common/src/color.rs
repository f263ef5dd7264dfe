//! Discrete five-level intensity scale.

use serde::Serialize;

use crate::grid::Cell;

/// GitHub contribution palette, lowest to highest.
pub const PALETTE: [&str; 5] = ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"];

/// Fill for in-range days with nothing to show.
pub const EMPTY_CELL_COLOR: &str = "#1a1a1a";

/// Intensity bucket 0..=4. 0 is empty, 4 is at or above the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorBucket(u8);

impl ColorBucket {
    pub const EMPTY: ColorBucket = ColorBucket(0);
    pub const MAX: ColorBucket = ColorBucket(4);

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn hex(self) -> &'static str {
        PALETTE[self.0 as usize]
    }
}

/// Map a value onto a bucket given the configured `[min, max]` range.
///
/// Anything strictly above `min` lands in bucket 1 or higher. A degenerate
/// range (`max <= min`) saturates to the top bucket.
pub fn bucket_for(value: Option<f64>, min: f64, max: f64) -> ColorBucket {
    let Some(value) = value else {
        return ColorBucket::EMPTY;
    };
    if value <= min {
        return ColorBucket::EMPTY;
    }
    if max <= min || value >= max {
        return ColorBucket::MAX;
    }
    let scaled = (((value - min) / (max - min)) * 4.0).ceil();
    ColorBucket(scaled.clamp(1.0, 4.0) as u8)
}

/// How the renderer should paint a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "bucket", rename_all = "snake_case")]
pub enum CellFill {
    /// Padding day outside the configured range.
    Transparent,
    Empty,
    Bucket(ColorBucket),
}

impl CellFill {
    pub fn css(self) -> &'static str {
        match self {
            CellFill::Transparent => "transparent",
            CellFill::Empty => EMPTY_CELL_COLOR,
            CellFill::Bucket(b) => b.hex(),
        }
    }
}

pub fn cell_fill(cell: &Cell, min: f64, max: f64) -> CellFill {
    if !cell.in_range {
        return CellFill::Transparent;
    }
    match cell.value() {
        None => CellFill::Empty,
        Some(v) => match bucket_for(Some(v), min, max) {
            ColorBucket::EMPTY => CellFill::Empty,
            b => CellFill::Bucket(b),
        },
    }
}
