//! Statuspage系サマリーJSONの正規化
//!
//! `{"page": {...}, "status": {"indicator": "...", "description": "..."}}`

use serde_json::Value;
use status_collector_common::types::now_timestamp;

use super::{as_object, scalar_field, NormalizeError, StatusSummary};

const DEFAULT_INDICATOR: &str = "Unknown";
const DEFAULT_DESCRIPTION: &str = "No description available";

/// Statuspage系ペイロードを要約
///
/// `status` キーがなければ既定値、`null` やオブジェクト以外なら形状エラー。
/// `page` などその他のキーは参照しない。
pub(super) fn summarize(payload: &Value) -> Result<StatusSummary, NormalizeError> {
    let root = as_object(payload, "payload")?;

    let (indicator, description, updated_at) = match root.get("status") {
        Some(status) => {
            let status = as_object(status, "status")?;
            (
                scalar_field(status, "indicator")?,
                scalar_field(status, "description")?,
                scalar_field(status, "updated_at")?,
            )
        }
        None => (None, None, None),
    };

    Ok(StatusSummary::new(
        indicator.unwrap_or_else(|| DEFAULT_INDICATOR.to_string()),
        description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        updated_at.unwrap_or_else(now_timestamp),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_real_summary_shape() {
        let payload = json!({
            "page": {
                "id": "kctbh9vrtdwd",
                "name": "GitHub",
                "url": "https://www.githubstatus.com",
                "updated_at": "2024-03-04T05:06:07.000Z"
            },
            "components": [],
            "status": {"indicator": "none", "description": "All Systems Operational"}
        });

        let summary = summarize(&payload).unwrap();
        assert_eq!(summary.status, "none");
        assert_eq!(summary.description, "All Systems Operational");
        assert_ne!(summary.last_updated, "2024-03-04T05:06:07.000Z");
    }

    #[test]
    fn test_status_updated_at_is_used() {
        let payload = json!({
            "updated_at": "2024-02-02T00:00:00Z",
            "status": {"indicator": "major", "updated_at": "2024-01-01T00:00:00Z"}
        });

        let summary = summarize(&payload).unwrap();
        assert_eq!(summary.last_updated, "2024-01-01T00:00:00Z");
        assert_eq!(summary.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_malformed_page_and_top_level_keys_are_ignored() {
        let payload = json!({
            "page": "github",
            "updated_at": {"at": "2024-02-02"},
            "status": {"indicator": "critical", "description": "Major outage"}
        });

        let summary = summarize(&payload).unwrap();
        assert_eq!(summary.status, "critical");
        assert_eq!(summary.description, "Major outage");
    }

    #[test]
    fn test_empty_status_object_uses_defaults() {
        let summary = summarize(&json!({"status": {}})).unwrap();
        assert_eq!(summary.status, DEFAULT_INDICATOR);
        assert_eq!(summary.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_missing_status_uses_defaults() {
        let summary = summarize(&json!({"components": []})).unwrap();
        assert_eq!(summary.status, DEFAULT_INDICATOR);
        assert_eq!(summary.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_null_status_is_shape_error() {
        let result = summarize(&json!({"status": null}));
        assert!(matches!(result, Err(NormalizeError::Shape(_))));
    }

    #[test]
    fn test_status_not_object_is_shape_error() {
        let result = summarize(&json!({"status": "operational"}));
        assert!(matches!(result, Err(NormalizeError::Shape(_))));
    }

    #[test]
    fn test_payload_not_object_is_shape_error() {
        let result = summarize(&json!([{"status": {}}]));
        assert!(matches!(result, Err(NormalizeError::Shape(_))));
    }

    #[test]
    fn test_nested_indicator_is_shape_error() {
        let result = summarize(&json!({"status": {"indicator": {"level": "minor"}}}));
        assert!(matches!(result, Err(NormalizeError::Shape(_))));
    }
}
