//! Heatmap CLI – loads notes from a vault (or a JSON record file), builds
//! the calendar heatmap and prints it as text or JSON.

mod render;
mod vault;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use heatmap_common::config::{self, Config, OutputFormat};
use heatmap_common::view::{Focus, HeatmapView};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── load config ──────────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Config::default_path().to_string());
    let mut config = config::load(&PathBuf::from(&config_path)).context("Config load failed")?;

    if let Ok(source) = std::env::var("HEATMAP_SOURCE") {
        config.source = PathBuf::from(source);
    }
    if let Some(output) = std::env::var("HEATMAP_OUTPUT")
        .ok()
        .and_then(|v| OutputFormat::parse(&v))
    {
        config.output = output;
    }

    // ── load records ─────────────────────────────────────────────────
    let notes = vault::load_source(&config.source)
        .with_context(|| format!("Cannot load records from {}", config.source.display()))?;

    // ── build ────────────────────────────────────────────────────────
    let mut view = HeatmapView::new();
    view.on_data_updated(notes, config.heatmap.clone(), Focus::Nothing);
    view.on_resize(config.container_width);

    if let Some(r) = view.resolved_config() {
        info!(
            "Heatmap {} → {}: {} week(s), {} month label(s)",
            r.start_date,
            r.end_date,
            view.grid().week_count(),
            view.labels().len()
        );
    }

    // ── output ───────────────────────────────────────────────────────
    match config.output {
        OutputFormat::Text => print!("{}", render::render_text(&view)),
        OutputFormat::Json => {
            println!("{}", render::render_json(&view).context("Cannot serialize heatmap")?)
        }
    }
    Ok(())
}
