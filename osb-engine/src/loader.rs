//! Score source loading
//!
//! A source document has one of two shapes:
//!
//! ```json
//! { "leaderboards": { "HD": [ ... ] }, "stats": { "HD": { ... } } }
//! ```
//!
//! or the older bare mapping `{ "HD": [ ... ] }`. Both are normalized into a
//! [`SourceDocument`].

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use osb_common::{Error, Result};

use crate::record::Record;
use crate::{Leaderboards, Stats};

const LEADERBOARDS_KEY: &str = "leaderboards";
const STATS_KEY: &str = "stats";

/// One parsed source, normalized to `(leaderboards, stats)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    pub leaderboards: Leaderboards,
    pub stats: Stats,
}

/// Normalize a parsed JSON document
///
/// Documents that are not objects contribute nothing. Category values that
/// are not arrays, and array entries that are not objects, are skipped.
pub fn parse_document(value: Value) -> Result<SourceDocument> {
    let Value::Object(mut root) = value else {
        debug!("Source document is not an object, contributing nothing");
        return Ok(SourceDocument::default());
    };

    let stats = match root.shift_remove(STATS_KEY) {
        None => Stats::new(),
        Some(Value::Object(map)) => map.into_iter().collect(),
        Some(other) => {
            warn!("Ignoring non-object stats section: {}", type_name(&other));
            Stats::new()
        }
    };

    let categories = match root.shift_remove(LEADERBOARDS_KEY) {
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "leaderboards section must be an object, found {}",
                type_name(&other)
            )));
        }
        // Bare shape: the remaining top-level keys are the categories
        None => root,
    };

    let mut leaderboards = Leaderboards::with_capacity(categories.len());
    for (category, entries) in categories {
        let entries = match entries {
            Value::Array(entries) => entries,
            other => {
                warn!(
                    "Skipping category '{}': expected a list of scores, found {}",
                    category,
                    type_name(&other)
                );
                continue;
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            if !entry.is_object() {
                warn!("Skipping non-object score in category '{}'", category);
                continue;
            }
            match serde_json::from_value::<Record>(entry) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable score in category '{}': {}", category, e),
            }
        }
        leaderboards.insert(category, records);
    }

    Ok(SourceDocument { leaderboards, stats })
}

/// Read one source
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_source(path: &Path) -> Result<Option<SourceDocument>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let value: Value = serde_json::from_str(&content)?;
    parse_document(value).map(Some)
}

/// Read every source in order, skipping missing and malformed ones
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Vec<SourceDocument> {
    let mut documents = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        match read_source(path) {
            Ok(Some(document)) => {
                debug!(
                    "Loaded {} categor(ies) from {}",
                    document.leaderboards.len(),
                    path.display()
                );
                documents.push(document);
            }
            Ok(None) => debug!("Score source {} not present, skipping", path.display()),
            Err(e) => warn!("Could not read score source {}: {}", path.display(), e),
        }
    }

    if documents.is_empty() && !paths.is_empty() {
        info!("No score sources could be loaded");
    }

    documents
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_shape() {
        let doc = parse_document(json!({
            "leaderboards": {"HD": [{"user": "a", "pp": 10}]},
            "stats": {"HD": {"players": 1}}
        }))
        .unwrap();
        assert_eq!(doc.leaderboards["HD"].len(), 1);
        assert_eq!(doc.stats["HD"], json!({"players": 1}));
    }

    #[test]
    fn test_bare_shape_has_no_stats() {
        let doc = parse_document(json!({
            "NM": [{"user": "a"}],
            "DT": []
        }))
        .unwrap();
        let categories: Vec<&str> = doc.leaderboards.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["NM", "DT"]);
        assert!(doc.stats.is_empty());
    }

    #[test]
    fn test_bare_shape_stats_key_keeps_category_order() {
        let doc = parse_document(json!({
            "stats": {},
            "NM": [],
            "HD": [],
            "DT": []
        }))
        .unwrap();
        let categories: Vec<&str> = doc.leaderboards.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["NM", "HD", "DT"]);
    }

    #[test]
    fn test_non_object_document_is_empty() {
        let doc = parse_document(json!([1, 2, 3])).unwrap();
        assert_eq!(doc, SourceDocument::default());
    }

    #[test]
    fn test_non_object_leaderboards_rejected() {
        assert!(parse_document(json!({"leaderboards": [1]})).is_err());
    }

    #[test]
    fn test_bad_categories_and_entries_skipped() {
        let doc = parse_document(json!({
            "NM": "oops",
            "HD": [{"user": "a"}, 7, "x", {"user": "b"}]
        }))
        .unwrap();
        assert!(!doc.leaderboards.contains_key("NM"));
        assert_eq!(doc.leaderboards["HD"].len(), 2);
    }
}
