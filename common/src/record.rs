//! Source records as supplied by the host data source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of a record, used by the renderer as the navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An opaque date-bearing record.
pub trait RawRecord {
    fn id(&self) -> &RecordId;

    /// File name without extension.
    fn basename(&self) -> &str;

    /// Raw property value as text, or `None` when the property is absent.
    fn property(&self, key: &str) -> Option<String>;
}

/// A note-like record: identity, basename and flat string properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub basename: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Note {
    pub fn new(id: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            id: RecordId(id.into()),
            basename: basename.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl RawRecord for Note {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn basename(&self) -> &str {
        &self.basename
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}

#[derive(Debug, Error)]
pub enum RecordLoadError {
    #[error("cannot read records from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a JSON array of [`Note`]s.
pub fn load_records_json(path: &Path) -> Result<Vec<Note>, RecordLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| RecordLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| RecordLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_property_lookup() {
        let n = Note::new("daily/2024-01-01.md", "2024-01-01").with_property("pushups", "12");
        assert_eq!(n.property("pushups").as_deref(), Some("12"));
        assert_eq!(n.property("missing"), None);
        assert_eq!(n.id().as_str(), "daily/2024-01-01.md");
    }

    #[test]
    fn test_load_records_json() {
        let dir = std::env::temp_dir().join("heatmap_record_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("records.json");
        std::fs::write(
            &path,
            r#"[{"id":"a.md","basename":"2024-05-01","properties":{"done":"true"}},
                {"id":"b.md","basename":"notes"}]"#,
        )
        .unwrap();

        let notes = load_records_json(&path).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].property("done").as_deref(), Some("true"));
        assert!(notes[1].properties.is_empty());
    }

    #[test]
    fn test_load_records_json_errors() {
        let missing = std::env::temp_dir().join("heatmap_record_test/none.json");
        assert!(matches!(
            load_records_json(&missing),
            Err(RecordLoadError::Read { .. })
        ));

        let dir = std::env::temp_dir().join("heatmap_record_test");
        std::fs::create_dir_all(&dir).unwrap();
        let bad = dir.join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(
            load_records_json(&bad),
            Err(RecordLoadError::Parse { .. })
        ));
    }
}
