//! Loading records from a directory of Markdown notes.
//!
//! Each `.md` file becomes a [`Note`]: its identity is the path relative to
//! the vault root, its basename the file stem, and its properties the flat
//! `key: value` lines of a leading `---` frontmatter block.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use heatmap_common::record::{load_records_json, Note};

/// Load records from `source`: a `.json` file or a notes directory.
pub fn load_source(source: &Path) -> Result<Vec<Note>> {
    if source.extension().is_some_and(|e| e == "json") {
        let notes = load_records_json(source)?;
        info!("Loaded {} record(s) from {}", notes.len(), source.display());
        return Ok(notes);
    }
    discover_notes(source)
}

/// Recursively collect `.md` notes under `root`.
pub fn discover_notes(root: &Path) -> Result<Vec<Note>> {
    let mut notes = Vec::new();

    if !root.exists() {
        warn!("Vault directory does not exist: {}. Heatmap will be empty.", root.display());
        return Ok(notes);
    }

    walk(root, root, &mut notes)?;
    notes.sort_by(|a, b| a.id.cmp(&b.id));
    info!("Discovered {} note(s) in {}", notes.len(), root.display());
    Ok(notes)
}

fn walk(root: &Path, dir: &Path, notes: &mut Vec<Note>) -> Result<()> {
    for entry in std::fs::read_dir(dir).with_context(|| format!("Cannot read {}", dir.display()))? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }
        if path.is_dir() {
            walk(root, &path, notes)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            match load_note(root, &path) {
                Ok(n) => notes.push(n),
                Err(e) => warn!("Skipping {}: {e:#}", path.display()),
            }
        }
    }
    Ok(())
}

fn load_note(root: &Path, path: &Path) -> Result<Note> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read note {}", path.display()))?;
    let id = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    let basename = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Note {
        id: id.as_str().into(),
        basename,
        properties: parse_frontmatter(&text),
    })
}

/// Flat `key: value` pairs from a leading `---` block. Indented lines
/// (nested maps, list items) are ignored; an unterminated block yields
/// nothing.
pub fn parse_frontmatter(text: &str) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    let mut lines = text.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return props;
    }

    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        if line.starts_with(char::is_whitespace) || line.trim_start().starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once(':') {
            let key = key.trim();
            let val = val.trim().trim_matches('"').trim_matches('\'');
            if !key.is_empty() {
                props.insert(key.to_string(), val.to_string());
            }
        }
    }

    if !closed {
        props.clear();
    }
    props
}
