//! レスポンス正規化
//!
//! プロバイダーごとの生レスポンスを共通の`StatusRecord`に変換する。
//! 変換は全域関数で、どの入力に対しても必ずレコードを1件返す。
//!
//! 失敗は段階ごとに扱う:
//! - JSONとして解釈できない本文は取得失敗と同じ`Unknown`
//! - フィールド欠落は既定値で埋める
//! - 構造の不一致（オブジェクトであるべき値が配列等）は`NormalizeError::Shape`
//! - それ以外の想定外の値は`NormalizeError::Unexpected`

mod aws;
mod statusio;

use serde_json::{Map, Value};
use status_collector_common::types::{
    now_timestamp, FetchOutcome, ProviderConfig, StatusFormat, StatusRecord,
};
use thiserror::Error;
use tracing::warn;

/// 取得失敗時のステータス
pub const STATUS_UNKNOWN: &str = "Unknown";

/// 解析失敗時のステータス
pub const STATUS_ERROR: &str = "Error";

/// 形状エラー時の説明文（詳細はログにのみ出力する）
pub const PARSE_FAILURE_DESCRIPTION: &str = "Unable to parse status data";

/// 取得失敗でメッセージが空の場合の説明文
pub const UNKNOWN_ERROR_DESCRIPTION: &str = "Unknown error";

/// 正規化エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// 本文がJSONとして解釈できない
    #[error("{0}")]
    Decode(String),

    /// ペイロードの構造が形式と一致しない
    #[error("unexpected payload shape: {0}")]
    Shape(String),

    /// それ以外の処理失敗
    #[error("{0}")]
    Unexpected(String),
}

/// 正規化結果のうちプロバイダー固有の部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    /// ステータス
    pub status: String,
    /// 説明文
    pub description: String,
    /// 最終更新時刻
    pub last_updated: String,
}

impl StatusSummary {
    fn new(
        status: impl Into<String>,
        description: impl Into<String>,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            status: status.into(),
            description: description.into(),
            last_updated: last_updated.into(),
        }
    }
}

/// 取得結果を`StatusRecord`に正規化
///
/// `status_page_url`は常にレジストリの値を使い、ペイロードからは取らない。
pub fn normalize(provider: &ProviderConfig, outcome: FetchOutcome) -> StatusRecord {
    let summary = match outcome {
        FetchOutcome::Err { message } => unknown(message),
        FetchOutcome::Ok { body, format } => match summarize(format, &body) {
            Ok(summary) => summary,
            Err(NormalizeError::Decode(message)) => {
                warn!(
                    provider = %provider.name,
                    error = %message,
                    "Status body is not valid JSON"
                );
                unknown(message)
            }
            Err(NormalizeError::Shape(detail)) => {
                warn!(
                    provider = %provider.name,
                    format = %format,
                    detail = %detail,
                    "Unable to parse status data"
                );
                StatusSummary::new(STATUS_ERROR, PARSE_FAILURE_DESCRIPTION, now_timestamp())
            }
            Err(NormalizeError::Unexpected(message)) => {
                warn!(
                    provider = %provider.name,
                    format = %format,
                    error = %message,
                    "Error processing status"
                );
                StatusSummary::new(
                    STATUS_ERROR,
                    format!("Error processing status: {}", message),
                    now_timestamp(),
                )
            }
        },
    };

    StatusRecord {
        name: provider.name.clone(),
        status: summary.status,
        description: summary.description,
        last_updated: summary.last_updated,
        status_page_url: Some(provider.status_page_url.clone()),
    }
}

fn unknown(message: String) -> StatusSummary {
    let description = if message.is_empty() {
        UNKNOWN_ERROR_DESCRIPTION.to_string()
    } else {
        message
    };
    StatusSummary::new(STATUS_UNKNOWN, description, now_timestamp())
}

/// レスポンス本文を形式ごとに要約
pub fn summarize(format: StatusFormat, body: &str) -> Result<StatusSummary, NormalizeError> {
    let payload: Value = serde_json::from_str(body.trim_start_matches('\u{feff}'))
        .map_err(|e| NormalizeError::Decode(e.to_string()))?;

    match format {
        StatusFormat::StatusIo => statusio::summarize(&payload),
        StatusFormat::Aws => aws::summarize(&payload),
    }
}

/// 値をJSONオブジェクトとして取り出す
fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, NormalizeError> {
    value
        .as_object()
        .ok_or_else(|| NormalizeError::Shape(format!("`{}` is not an object", what)))
}

/// スカラー値を文字列として取り出す
///
/// キーなし・nullは None、数値・真偽値はJSON表記、オブジェクト・配列は形状エラー。
fn scalar_field(object: &Map<String, Value>, key: &str) -> Result<Option<String>, NormalizeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
        Some(_) => Err(NormalizeError::Shape(format!("`{}` is not a scalar", key))),
    }
}
