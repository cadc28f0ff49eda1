//! Export/import adapter
//!
//! Exports serialize the full record set to a pretty-printed JSON array
//! named after the current date; imports require a top-level JSON array and
//! normalize every element. The actual file download/upload mechanics live
//! with the caller.

use crate::schema::{self, LogRecord};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde_json::Value;

/// Backup filename embedding a calendar date:
/// `baby-log-backup-<YYYY-MM-DD>.json`
pub fn export_filename(date: NaiveDate) -> String {
    format!("baby-log-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize the record set as a pretty-printed JSON array.
pub fn to_export_json(records: &[LogRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse an import payload. The top-level value must be an array or the
/// import fails with `InvalidFormat`; elements are normalized individually.
pub fn parse_import(payload: &Value) -> Result<Vec<LogRecord>> {
    let items = payload
        .as_array()
        .ok_or_else(|| Error::InvalidFormat("top-level value must be an array".to_string()))?;

    Ok(items
        .iter()
        .map(|item| schema::normalize(Some(item)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filename_embeds_the_given_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(export_filename(date), "baby-log-backup-2024-06-15.json");
    }

    #[test]
    fn export_is_a_pretty_json_array() {
        let records = vec![LogRecord::default()];
        let text = to_export_json(&records).unwrap();
        assert!(text.starts_with("[\n"));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn import_requires_an_array() {
        let err = parse_import(&json!({"id": "a"})).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
        let err = parse_import(&json!("records")).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn import_normalizes_partial_records() {
        let payload = json!([
            { "id": "a", "date": "2024-01-01" },
            { "summary": "only a summary" }
        ]);
        let records = parse_import(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[0].feedings.len(), schema::FEEDING_SLOTS);
        assert_eq!(records[1].summary, "only a summary");
        assert!(records[1].health.skin.none);
    }
}
