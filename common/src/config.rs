//! 設定管理
//!
//! CollectorConfig と既定のプロバイダー一覧

use crate::error::{CommonError, CommonResult};
use crate::types::{ProviderConfig, StatusFormat};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 環境変数のプレフィックス（例: `STATUS_COLLECTOR_PORT`）
pub const ENV_PREFIX: &str = "STATUS_COLLECTOR";

/// ページ期限がリクエスト単位のタイムアウトを上回るべき最小の余裕（秒）
pub const MIN_PAGE_TIMEOUT_MARGIN_SECS: u64 = 1;

/// コレクター設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// プロバイダー1件あたりのHTTPタイムアウト（秒）(デフォルト: 5)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// ページ全体の収集期限（秒）(デフォルト: 10)
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// 監視対象プロバイダー（表示順）
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    5
}

fn default_page_timeout() -> u64 {
    10
}

/// 既定の監視対象プロバイダー
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(
            "GitHub",
            "https://www.githubstatus.com/api/v2/summary.json",
            StatusFormat::StatusIo,
            "https://www.githubstatus.com/",
        ),
        ProviderConfig::new(
            "AWS",
            "https://status.aws.amazon.com/healthfeed/status.json",
            StatusFormat::Aws,
            "https://health.aws.amazon.com/health/status",
        ),
        ProviderConfig::new(
            "Grafana Cloud",
            "https://status.grafana.com/api/v2/summary.json",
            StatusFormat::StatusIo,
            "https://status.grafana.com/",
        ),
        ProviderConfig::new(
            "Opsgenie",
            "https://status.opsgenie.com/api/v2/summary.json",
            StatusFormat::StatusIo,
            "https://status.opsgenie.com/",
        ),
    ]
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            page_timeout_secs: default_page_timeout(),
            providers: default_providers(),
        }
    }
}

impl CollectorConfig {
    /// 設定を読み込む
    ///
    /// 既定値 → 設定ファイル（拡張子で形式判別、任意）→ `STATUS_COLLECTOR_*` 環境変数の順に上書きする。
    pub fn load(path: Option<&Path>) -> CommonResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// タイムアウト設定の整合性を検証
    pub fn validate(&self) -> CommonResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(CommonError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        let min_page_timeout = self
            .request_timeout_secs
            .saturating_add(MIN_PAGE_TIMEOUT_MARGIN_SECS);
        if self.page_timeout_secs < min_page_timeout {
            return Err(CommonError::Config(format!(
                "page_timeout_secs ({}) must be at least {} (request_timeout_secs + {})",
                self.page_timeout_secs, min_page_timeout, MIN_PAGE_TIMEOUT_MARGIN_SECS
            )));
        }
        Ok(())
    }

    /// プロバイダー1件あたりのタイムアウト
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// ページ全体の収集期限
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
