//! Habit heatmap core – turns date-bearing records into a week-aligned
//! calendar intensity grid with month labels and responsive geometry.
//!
//! Rendering, navigation and event plumbing live in the host; this crate
//! only produces the plain structures they consume.

pub mod aggregate;
pub mod calendar;
pub mod color;
pub mod config;
pub mod date_key;
pub mod grid;
pub mod labels;
pub mod layout;
pub mod pipeline;
pub mod record;
pub mod tooltip;
pub mod view;
