//! AWSヘルスフィードの正規化
//!
//! `{"current_events": [{"details": "...", "date": "..."}], "archive": [...]}`

use serde_json::Value;
use status_collector_common::types::now_timestamp;

use super::{as_object, scalar_field, NormalizeError, StatusSummary};

const STATUS_OPERATIONAL: &str = "Operational";
const STATUS_DISRUPTED: &str = "Disrupted";
const OPERATIONAL_DESCRIPTION: &str = "All services operating normally";
const DEFAULT_EVENT_DETAILS: &str = "Service issues reported";

/// AWSヘルスフィードを要約
///
/// `current_events` が空相当（なし・null・false・0・空文字列・空配列・空オブジェクト）なら
/// Operational、そうでなければ先頭イベントで Disrupted。
pub(super) fn summarize(payload: &Value) -> Result<StatusSummary, NormalizeError> {
    let root = as_object(payload, "payload")?;

    let events = match root.get("current_events") {
        None => return Ok(operational()),
        Some(value) if is_empty_value(value) => return Ok(operational()),
        Some(Value::Array(events)) => events,
        Some(Value::Number(_) | Value::Bool(_)) => {
            return Err(NormalizeError::Unexpected(
                "`current_events` is not indexable".to_string(),
            ))
        }
        Some(_) => {
            return Err(NormalizeError::Shape(
                "`current_events` is not an array".to_string(),
            ))
        }
    };

    let Some(first) = events.first() else {
        return Ok(operational());
    };

    let event = as_object(first, "current_events[0]")?;
    let details = scalar_field(event, "details")?;
    let date = scalar_field(event, "date")?;

    Ok(StatusSummary::new(
        STATUS_DISRUPTED,
        details.unwrap_or_else(|| DEFAULT_EVENT_DETAILS.to_string()),
        date.unwrap_or_else(now_timestamp),
    ))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn operational() -> StatusSummary {
    StatusSummary::new(STATUS_OPERATIONAL, OPERATIONAL_DESCRIPTION, now_timestamp())
}
