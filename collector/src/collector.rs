//! ステータス収集パイプライン
//!
//! フェッチャーでレジストリ全件を並列取得し、ノーマライザーで共通形式に揃える。

use std::time::Duration;

use status_collector_common::{config::CollectorConfig, types::StatusRecord};
use tracing::{error, info};

use crate::error::{CollectorError, CollectorResult};
use crate::fetcher::StatusFetcher;
use crate::normalizer::{normalize, STATUS_ERROR, STATUS_UNKNOWN};
use crate::registry::ProviderRegistry;

/// デフォルトのページ全体の収集期限（秒）
const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 10;

/// ステータス収集パイプライン
#[derive(Debug, Clone)]
pub struct StatusCollector {
    registry: ProviderRegistry,
    fetcher: StatusFetcher,
    page_timeout: Duration,
}

impl StatusCollector {
    /// 新しいコレクターを作成
    pub fn new(registry: ProviderRegistry, fetcher: StatusFetcher) -> Self {
        Self {
            registry,
            fetcher,
            page_timeout: Duration::from_secs(DEFAULT_PAGE_TIMEOUT_SECS),
        }
    }

    /// ページ全体の収集期限を設定
    pub fn with_page_timeout(mut self, page_timeout: Duration) -> Self {
        self.page_timeout = page_timeout;
        self
    }

    /// 設定からコレクターを作成
    pub fn from_config(config: &CollectorConfig) -> CollectorResult<Self> {
        let registry = ProviderRegistry::from_config(config)?;
        let fetcher = StatusFetcher::new(config.request_timeout())?;
        Ok(Self::new(registry, fetcher).with_page_timeout(config.page_timeout()))
    }

    /// 監視対象レジストリ
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// 全プロバイダーのステータスを収集
    ///
    /// 個々のプロバイダーの失敗やページ期限切れはそのプロバイダーのレコードに変換され、
    /// 常にレジストリと同じ件数・順序のレコードを返す。
    pub async fn collect(&self) -> Vec<StatusRecord> {
        let fetched = self.fetcher.fetch_all(&self.registry, self.page_timeout).await;

        let records: Vec<StatusRecord> = fetched
            .into_iter()
            .map(|(provider, outcome)| normalize(&provider, outcome))
            .collect();

        let failed = records
            .iter()
            .filter(|r| r.status == STATUS_UNKNOWN || r.status == STATUS_ERROR)
            .count();
        info!(
            providers = records.len(),
            failed = failed,
            "Collected provider statuses"
        );

        records
    }

    /// ステータスを収集し、収集タスク自体が失敗した場合はシステムエラーレコード1件を返す
    ///
    /// 収集は別タスクで実行し、パニックもここで受け止める。
    pub async fn collect_or_system_error(&self) -> Vec<StatusRecord> {
        let collector = self.clone();
        match tokio::spawn(async move { collector.collect().await }).await {
            Ok(records) => records,
            Err(e) => {
                let e = CollectorError::Internal(format!("status collection task failed: {}", e));
                error!(error = %e, "Status collection failed");
                vec![StatusRecord::system_error(&e)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use status_collector_common::types::{ProviderConfig, StatusFormat, SYSTEM_ERROR_NAME};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(name: &str, url: String, format: StatusFormat) -> ProviderConfig {
        ProviderConfig::new(name, url, format, format!("https://{}.example.com/", name))
    }

    fn collector(providers: Vec<ProviderConfig>, request_timeout_ms: u64) -> StatusCollector {
        let registry = ProviderRegistry::new(providers).unwrap();
        let fetcher = StatusFetcher::new(Duration::from_millis(request_timeout_ms)).unwrap();
        StatusCollector::new(registry, fetcher)
    }

    #[tokio::test]
    async fn test_collect_yields_one_record_per_provider() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/github"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": {"indicator": "none", "description": "All Systems Operational"}
            })))
            .mount(&mock)
            .await;
        Mock::given(method("GET"))
            .and(path("/aws"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_events": []
            })))
            .mount(&mock)
            .await;
        Mock::given(method("GET"))
            .and(path("/grafana"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock)
            .await;

        let collector = collector(
            vec![
                provider("github", format!("{}/github", mock.uri()), StatusFormat::StatusIo),
                provider("aws", format!("{}/aws", mock.uri()), StatusFormat::Aws),
                provider("grafana", format!("{}/grafana", mock.uri()), StatusFormat::StatusIo),
                provider(
                    "opsgenie",
                    "http://127.0.0.1:59999/summary.json".to_string(),
                    StatusFormat::StatusIo,
                ),
            ],
            2000,
        );

        let records = collector.collect().await;
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["github", "aws", "grafana", "opsgenie"]);

        assert_eq!(records[0].status, "none");
        assert_eq!(records[1].status, "Operational");
        assert_eq!(records[2].status, "Unknown");
        assert_eq!(records[2].description, "HTTP 500");
        assert_eq!(records[3].status, "Unknown");
        for record in &records {
            let expected = format!("https://{}.example.com/", record.name);
            assert_eq!(record.status_page_url.as_deref(), Some(expected.as_str()));
        }
    }

    #[tokio::test]
    async fn test_page_deadline_only_affects_unfinished_providers() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_events": []
            })))
            .mount(&mock)
            .await;
        Mock::given(method("GET"))
            .and(path("/hang"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock)
            .await;

        let collector = collector(
            vec![
                provider("fast", format!("{}/fast", mock.uri()), StatusFormat::Aws),
                provider("hang", format!("{}/hang", mock.uri()), StatusFormat::StatusIo),
            ],
            10_000,
        )
        .with_page_timeout(Duration::from_millis(300));

        let records = collector.collect_or_system_error().await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.name != SYSTEM_ERROR_NAME));

        assert_eq!(records[0].name, "fast");
        assert_eq!(records[0].status, "Operational");
        assert_eq!(records[1].name, "hang");
        assert_eq!(records[1].status, "Unknown");
        assert!(records[1].description.starts_with("Timeout error:"));
        assert_eq!(
            records[1].status_page_url.as_deref(),
            Some("https://hang.example.com/")
        );
    }

    #[tokio::test]
    async fn test_collect_empty_registry() {
        let collector = collector(Vec::new(), 1000);
        let records = collector.collect_or_system_error().await;
        assert!(records.is_empty());
    }

    #[test]
    fn test_from_default_config() {
        let collector = StatusCollector::from_config(&CollectorConfig::default()).unwrap();
        assert_eq!(collector.registry().len(), 4);
        assert_eq!(collector.page_timeout, Duration::from_secs(10));
    }
}
