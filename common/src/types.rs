//! 共通型定義
//!
//! ProviderConfig, FetchOutcome, StatusRecord等のコアデータ型

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// システムエラー用の合成レコード名
pub const SYSTEM_ERROR_NAME: &str = "System Error";

/// ステータスAPIのレスポンス形式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusFormat {
    /// Statuspage系サマリーJSON（`status.indicator` / `status.description`）
    StatusIo,
    /// AWSヘルスフィード（`current_events`配列）
    Aws,
}

impl StatusFormat {
    /// 設定ファイル上の表記を返す
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFormat::StatusIo => "statusio",
            StatusFormat::Aws => "aws",
        }
    }
}

impl fmt::Display for StatusFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 監視対象プロバイダー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// 表示名（レジストリ内で一意）
    pub name: String,
    /// ステータスAPIのURL
    pub url: String,
    /// レスポンス形式
    pub format: StatusFormat,
    /// 人間向けステータスページのURL
    pub status_page_url: String,
}

impl ProviderConfig {
    /// 新しいプロバイダー設定を作成
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        format: StatusFormat,
        status_page_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            format,
            status_page_url: status_page_url.into(),
        }
    }
}

/// 1プロバイダー分の取得結果
///
/// Fetcherが生成し、Normalizerが即座に消費する。保持はしない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// HTTP 200で本文を取得できた
    Ok {
        /// レスポンス本文（テキスト）
        body: String,
        /// 取得元プロバイダーのレスポンス形式
        format: StatusFormat,
    },
    /// 取得失敗（非200、ネットワークエラー、タイムアウト等）
    Err {
        /// エラー内容
        message: String,
    },
}

impl FetchOutcome {
    /// エラー結果を作成
    pub fn error(message: impl Into<String>) -> Self {
        FetchOutcome::Err {
            message: message.into(),
        }
    }

    /// 取得成功か
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchOutcome::Ok { .. })
    }
}

/// 正規化済みステータスレコード
///
/// リクエストごとにプロバイダー1件につき1レコード生成され、そのまま描画に渡される。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusRecord {
    /// プロバイダー名
    pub name: String,
    /// ステータス（例: "none", "minor", "Operational", "Unknown", "Error"）
    pub status: String,
    /// 説明文
    pub description: String,
    /// 最終更新時刻（上流の値、または取得時刻のRFC 3339表記）
    pub last_updated: String,
    /// ステータスページURL（合成されたシステムエラーのみ None）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_page_url: Option<String>,
}

impl StatusRecord {
    /// リクエスト全体が失敗した場合の合成レコードを作成
    pub fn system_error(error: impl fmt::Display) -> Self {
        Self {
            name: SYSTEM_ERROR_NAME.to_string(),
            status: "Error".to_string(),
            description: format!("Error fetching statuses: {}", error),
            last_updated: now_timestamp(),
            status_page_url: None,
        }
    }
}

/// 現在時刻をRFC 3339（UTC、秒精度）で返す
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
