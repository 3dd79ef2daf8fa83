//! Update input: loading, validation, date ordering
//!
//! Input files are JSON arrays of objects carrying `date` (`YYYY-MM-DD`),
//! `text` and `project_id`. `Description` is accepted in place of `text`
//! so the server's stored update log can be fed in directly.

use chrono::NaiveDate;
use serde_json::Value;
use std::path::Path;

use labnote_common::storage::read_json_value;
use labnote_common::UpdateEntry;

use crate::{Result, SummarizeError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One update to summarize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUpdate {
    pub date: String,
    pub text: String,
    pub project_id: Option<String>,
}

impl From<UpdateEntry> for SourceUpdate {
    fn from(entry: UpdateEntry) -> Self {
        Self {
            date: entry.date,
            text: entry.description,
            project_id: entry.project_id.filter(|p| !p.trim().is_empty()),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `null` and blank ids mean "no project"; numbers keep their digits
fn optional_id(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(value_to_string(other)).filter(|id| !id.trim().is_empty()),
    }
}

/// Validate a parsed input document
pub fn parse_updates(payload: Value) -> Result<Vec<SourceUpdate>> {
    let items = match payload {
        Value::Array(items) if items.iter().all(Value::is_object) => items,
        _ => {
            return Err(SummarizeError::Input(
                "updates.json must be a JSON array of objects.".to_string(),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let date = item.get("date");
            let text = item.get("text").or_else(|| item.get("Description"));
            let project_id = item.get("project_id");

            match (date, text, project_id) {
                (Some(date), Some(text), Some(project_id)) => Ok(SourceUpdate {
                    date: value_to_string(date),
                    text: value_to_string(text),
                    project_id: optional_id(project_id),
                }),
                _ => Err(SummarizeError::Input(format!(
                    "Update at index {} missing required keys: date, text, project_id",
                    i
                ))),
            }
        })
        .collect()
}

/// Read and validate an updates file
pub async fn load_updates_file(path: &Path) -> Result<Vec<SourceUpdate>> {
    let payload = read_json_value(path).await?.ok_or_else(|| {
        SummarizeError::Input(format!("Updates file not found: {}", path.display()))
    })?;
    parse_updates(payload)
}

/// Stable sort by calendar date, oldest first
pub fn sort_by_date(updates: Vec<SourceUpdate>) -> Result<Vec<SourceUpdate>> {
    let mut dated = updates
        .into_iter()
        .enumerate()
        .map(|(i, update)| match NaiveDate::parse_from_str(update.date.trim(), DATE_FORMAT) {
            Ok(date) => Ok((date, update)),
            Err(_) => Err(SummarizeError::Input(format!(
                "Update at index {} has invalid date '{}' (expected YYYY-MM-DD)",
                i, update.date
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    dated.sort_by_key(|(date, _)| *date);
    Ok(dated.into_iter().map(|(_, update)| update).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::build_digest;
    use labnote_common::LabType;
    use serde_json::json;

    fn update(date: &str, text: &str) -> SourceUpdate {
        SourceUpdate {
            date: date.to_string(),
            text: text.to_string(),
            project_id: Some("P1".to_string()),
        }
    }

    #[test]
    fn test_parse_valid_updates() {
        let updates = parse_updates(json!([
            {"date": "2026-01-10", "text": "plates", "project_id": "P1"},
            {"date": "2026-01-12", "Description": "reads", "project_id": 7}
        ]))
        .unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].text, "plates");
        assert_eq!(updates[1].text, "reads");
        assert_eq!(updates[1].project_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_null_and_numeric_project_ids() {
        let updates = parse_updates(json!([
            {"date": "2026-01-10", "text": "plates", "project_id": null},
            {"date": "2026-01-11", "text": "reads", "project_id": 7},
            {"date": "2026-01-12", "text": "gels", "project_id": "  "}
        ]))
        .unwrap();

        assert_eq!(updates[0].project_id, None);
        assert_eq!(updates[1].project_id.as_deref(), Some("7"));
        assert_eq!(updates[2].project_id, None);

        let digest = build_digest(LabType::Wet, &updates[..1], &["summary".to_string()]);
        assert!(digest.latest.projects.is_empty());

        let digest = build_digest(LabType::Wet, &updates[1..2], &["summary".to_string()]);
        assert_eq!(digest.latest.projects, vec!["7".to_string()]);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_updates(json!({"date": "2026-01-10"})).unwrap_err();
        assert_eq!(err.to_string(), "updates.json must be a JSON array of objects.");

        let err = parse_updates(json!([{"date": "x"}, 3])).unwrap_err();
        assert_eq!(err.to_string(), "updates.json must be a JSON array of objects.");
    }

    #[test]
    fn test_parse_reports_missing_keys_with_index() {
        let err = parse_updates(json!([
            {"date": "2026-01-10", "text": "a", "project_id": "P1"},
            {"date": "2026-01-11", "text": "b"}
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Update at index 1 missing required keys: date, text, project_id"
        );
    }

    #[test]
    fn test_sort_is_chronological_and_stable() {
        let sorted = sort_by_date(vec![
            update("2026-02-01", "c"),
            update("2026-01-10", "a"),
            update("2026-01-10", "b"),
        ])
        .unwrap();

        let texts: Vec<&str> = sorted.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_rejects_bad_date() {
        let err = sort_by_date(vec![update("2026-01-10", "a"), update("Jan 12", "b")]).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_from_stored_entry() {
        let entry = UpdateEntry {
            date: "2026-01-10".to_string(),
            description: "note".to_string(),
            project_id: Some(" ".to_string()),
        };
        let source = SourceUpdate::from(entry);
        assert_eq!(source.text, "note");
        assert_eq!(source.project_id, None);
    }
}
