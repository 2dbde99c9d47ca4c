//! Schedule document builder.
//!
//! The working document is operator-editable JSON text of the shape
//! `{ "schedule": [entry, ...] }`. Edits must never fail: malformed text is
//! silently recovered into a minimal valid document.

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::api::StaffEntry;

/// A fresh document with an empty schedule list.
pub fn blank_document() -> String {
    pretty(&json!({ "schedule": [] }))
}

/// Append an entry to the document's schedule list.
///
/// If `doc_text` parses to an object whose `schedule` field is an array, the
/// entry is appended and every other top-level field is preserved. Anything
/// else (malformed JSON, a non-object, a missing or non-array `schedule`)
/// is replaced by a fresh document containing only the new entry.
pub fn append_entry(doc_text: &str, entry: &StaffEntry) -> String {
    let entry_value = serde_json::to_value(entry).expect("staff entry serializes to JSON");
    match serde_json::from_str::<Value>(doc_text) {
        Ok(Value::Object(mut doc))
            if doc.get("schedule").map(Value::is_array).unwrap_or(false) =>
        {
            if let Some(Value::Array(schedule)) = doc.get_mut("schedule") {
                schedule.push(entry_value);
            }
            pretty(&Value::Object(doc))
        }
        _ => pretty(&json!({ "schedule": [entry_value] })),
    }
}

/// Set the document's top-level `date` field, used by the backend to date
/// the generated sheet. Preserves the rest of the document; malformed text
/// is recovered into a blank document carrying the date.
pub fn set_document_date(doc_text: &str, date: NaiveDate) -> String {
    let stamp = Value::String(date.format("%Y-%m-%d").to_string());
    match serde_json::from_str::<Value>(doc_text) {
        Ok(Value::Object(mut doc)) => {
            doc.insert("date".to_string(), stamp);
            pretty(&Value::Object(doc))
        }
        _ => pretty(&json!({ "schedule": [], "date": stamp })),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("JSON value serializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use serde_json::json;

    fn entry(name: &str) -> StaffEntry {
        StaffEntry {
            name: name.to_string(),
            role: Role::Scale3,
            status: None,
            status_detail: None,
            start_hour: None,
            end_hour: None,
            tea_slot: None,
        }
    }

    fn parsed(text: &str) -> Value {
        serde_json::from_str(text).expect("builder output is valid JSON")
    }

    #[test]
    fn blank_document_has_empty_schedule() {
        assert_eq!(parsed(&blank_document()), json!({ "schedule": [] }));
    }

    #[test]
    fn append_to_blank_document() {
        let text = append_entry(&blank_document(), &entry("A"));
        assert_eq!(
            parsed(&text),
            json!({ "schedule": [{ "name": "A", "role": "Scale 3" }] })
        );
    }

    #[test]
    fn append_recovers_from_malformed_text() {
        let text = append_entry("not json", &entry("A"));
        assert_eq!(
            parsed(&text),
            json!({ "schedule": [{ "name": "A", "role": "Scale 3" }] })
        );
    }

    #[test]
    fn append_keeps_existing_entries_in_order() {
        let text = append_entry(r#"{"schedule":[{"name":"A","role":"Volunteer"}]}"#, &entry("B"));
        let doc = parsed(&text);
        let schedule = doc["schedule"].as_array().unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0]["name"], "A");
        assert_eq!(schedule[1]["name"], "B");
    }

    #[test]
    fn append_preserves_other_top_level_fields() {
        let text = append_entry(r#"{"schedule":[],"date":"2026-08-07"}"#, &entry("A"));
        let doc = parsed(&text);
        assert_eq!(doc["date"], "2026-08-07");
        assert_eq!(doc["schedule"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn append_starts_fresh_when_schedule_is_not_a_list() {
        let text = append_entry(r#"{"schedule":"oops","note":"kept?"}"#, &entry("A"));
        let doc = parsed(&text);
        assert_eq!(doc["schedule"].as_array().unwrap().len(), 1);
        assert!(doc.get("note").is_none());
    }

    #[test]
    fn date_stamp_preserves_document() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let text = set_document_date(r#"{"schedule":[{"name":"A","role":"Volunteer"}]}"#, date);
        let doc = parsed(&text);
        assert_eq!(doc["date"], "2026-08-07");
        assert_eq!(doc["schedule"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn date_stamp_replaces_previous_date() {
        let first = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let second = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
        let text = set_document_date(&set_document_date(&blank_document(), first), second);
        assert_eq!(parsed(&text)["date"], "2026-08-14");
    }

    #[test]
    fn date_stamp_recovers_from_malformed_text() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let doc = parsed(&set_document_date("[]", date));
        assert_eq!(doc["date"], "2026-08-07");
        assert_eq!(doc["schedule"], json!([]));
    }
}
