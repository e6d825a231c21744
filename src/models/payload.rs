use std::fmt;

use serde_json::Value;

use crate::error::{CleanerError, Result};

/// One step of a lookup through the parsed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member
    Key(&'static str),
    /// Array element
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Location of the word alignment array inside a published document payload
pub const ALIGNMENT_PATH: &[PathSegment] = &[
    PathSegment::Key("mediaLibrary"),
    PathSegment::Key("mediaRefs"),
    PathSegment::Index(0),
    PathSegment::Key("voiceover"),
    PathSegment::Key("metadata"),
    PathSegment::Key("alignment"),
];

/// Render a path as `a.b[0].c`
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        if let PathSegment::Key(_) = segment {
            if !out.is_empty() {
                out.push('.');
            }
        }
        out.push_str(&segment.to_string());
    }
    out
}

/// Walk `path` from `root`, failing on the first absent step.
pub fn require_path<'a>(root: &'a Value, path: &[PathSegment]) -> Result<&'a Value> {
    let mut current = root;
    for (depth, segment) in path.iter().enumerate() {
        let next = match segment {
            PathSegment::Key(key) => current.get(*key),
            PathSegment::Index(index) => current.get(*index),
        };
        current = next.ok_or_else(|| CleanerError::MissingAlignment {
            path: format_path(path),
            missing: format_path(&path[..=depth]),
        })?;
    }
    Ok(current)
}

/// The alignment entries of a document payload, in reading order
pub fn alignment_entries(document: &Value) -> Result<&[Value]> {
    let alignment = require_path(document, ALIGNMENT_PATH)?;
    alignment
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CleanerError::MissingAlignment {
            path: format_path(ALIGNMENT_PATH),
            missing: format!("{} (not an array)", format_path(ALIGNMENT_PATH)),
        })
}

/// A named participant from the payload's voice list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub name: String,
}

/// Read the optional voice list.
///
/// Returns `None` when the list is absent or any entry lacks an `id` or
/// `name` key. Entries whose `id` or `name` is not a string are skipped,
/// the rest are kept.
pub fn read_voices(document: &Value) -> Option<Vec<Voice>> {
    let entries = document.get("voices")?.as_array()?;

    let mut voices = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = entry.get("id")?;
        let name = entry.get("name")?;
        if let (Some(id), Some(name)) = (id.as_str(), name.as_str()) {
            voices.push(Voice {
                id: id.to_string(),
                name: name.to_string(),
            });
        }
    }

    Some(voices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_path_reaches_alignment() {
        let doc = json!({
            "mediaLibrary": {"mediaRefs": [{"voiceover": {"metadata": {"alignment": [{"word": "hi"}]}}}]}
        });

        let entries = alignment_entries(&doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["word"], "hi");
    }

    #[test]
    fn test_require_path_reports_first_missing_step() {
        let doc = json!({"mediaLibrary": {"mediaRefs": [{"voiceover": {}}]}});

        match require_path(&doc, ALIGNMENT_PATH) {
            Err(CleanerError::MissingAlignment { path, missing }) => {
                assert_eq!(path, "mediaLibrary.mediaRefs[0].voiceover.metadata.alignment");
                assert_eq!(missing, "mediaLibrary.mediaRefs[0].voiceover.metadata");
            }
            other => panic!("expected MissingAlignment, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_media_refs_is_missing_alignment() {
        let doc = json!({"mediaLibrary": {"mediaRefs": []}});
        let err = alignment_entries(&doc).unwrap_err();
        assert!(matches!(err, CleanerError::MissingAlignment { .. }));
    }

    #[test]
    fn test_non_array_alignment_is_missing_alignment() {
        let doc = json!({
            "mediaLibrary": {"mediaRefs": [{"voiceover": {"metadata": {"alignment": "nope"}}}]}
        });
        let err = alignment_entries(&doc).unwrap_err();
        assert!(matches!(err, CleanerError::MissingAlignment { .. }));
    }

    #[test]
    fn test_read_voices() {
        let doc = json!({"voices": [{"id": "A1", "name": "Alice", "color": "red"}]});
        let voices = read_voices(&doc).unwrap();
        assert_eq!(
            voices,
            vec![Voice {
                id: "A1".to_string(),
                name: "Alice".to_string()
            }]
        );
    }

    #[test]
    fn test_read_voices_discards_incomplete_list() {
        let doc = json!({"voices": [{"id": "A1", "name": "Alice"}, {"id": "B2"}]});
        assert!(read_voices(&doc).is_none());
        assert!(read_voices(&json!({})).is_none());
        assert!(read_voices(&json!({"voices": ["A1"]})).is_none());
    }

    #[test]
    fn test_read_voices_skips_non_string_entries() {
        let doc = json!({"voices": [
            {"id": "A1", "name": "Alice"},
            {"id": 7, "name": "Bot"},
            {"id": "C3", "name": null}
        ]});

        let voices = read_voices(&doc).unwrap();
        assert_eq!(
            voices,
            vec![Voice {
                id: "A1".to_string(),
                name: "Alice".to_string()
            }]
        );
    }
}
