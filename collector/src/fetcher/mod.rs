//! ステータスAPIフェッチャー
//!
//! 全プロバイダーへのGETを並列に発行し、プロバイダーごとに結果を隔離して返す。
//! 1件の失敗・タイムアウト・パニックが他のプロバイダーに影響することはない。

use std::time::{Duration, Instant};

use futures::future::join_all;
use reqwest::{Client, StatusCode};
use status_collector_common::types::{FetchOutcome, ProviderConfig};
use tokio::task::JoinHandle;
use tokio::time::timeout_at;
use tracing::{debug, error, warn};

use crate::error::{CollectorError, CollectorResult};
use crate::registry::ProviderRegistry;

/// ステータスAPIフェッチャー
///
/// 共有HTTPクライアント（接続プーリング有効）を保持する。クローンはクライアントを共有する。
#[derive(Debug, Clone)]
pub struct StatusFetcher {
    client: Client,
}

impl StatusFetcher {
    /// タイムアウト付きのHTTPクライアントでフェッチャーを作成
    pub fn new(timeout: Duration) -> CollectorResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("status-collector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CollectorError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    /// 既存のHTTPクライアントでフェッチャーを作成
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// 全プロバイダーを並列に取得
    ///
    /// 戻り値はレジストリの登録順で、プロバイダー1件につき必ず1エントリ。
    /// `deadline` までに終わらなかったプロバイダーはタスクを中断してエラー扱いにし、
    /// 終わったプロバイダーの結果はそのまま返す。
    pub async fn fetch_all(
        &self,
        registry: &ProviderRegistry,
        deadline: Duration,
    ) -> Vec<(ProviderConfig, FetchOutcome)> {
        let providers: Vec<ProviderConfig> = registry.iter().cloned().collect();

        let mut handles: Vec<JoinHandle<FetchOutcome>> = providers
            .iter()
            .cloned()
            .map(|provider| {
                let fetcher = self.clone();
                tokio::spawn(async move { fetcher.fetch_one(&provider).await })
            })
            .collect();

        let expires_at = tokio::time::Instant::now() + deadline;
        let results = join_all(handles.iter_mut().map(|h| timeout_at(expires_at, h))).await;

        providers
            .into_iter()
            .zip(handles)
            .zip(results)
            .map(|((provider, handle), result)| {
                let outcome = match result {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(e)) => {
                        error!(provider = %provider.name, error = %e, "Fetch task join error");
                        FetchOutcome::error(format!("Fetch task failed: {}", e))
                    }
                    Err(_) => {
                        handle.abort();
                        warn!(
                            provider = %provider.name,
                            deadline_ms = deadline.as_millis() as u64,
                            "Status fetch exceeded page deadline"
                        );
                        FetchOutcome::error(
                            CollectorError::Timeout(format!(
                                "no response within the {}ms page deadline",
                                deadline.as_millis()
                            ))
                            .to_string(),
                        )
                    }
                };
                (provider, outcome)
            })
            .collect()
    }

    /// 単一プロバイダーを取得
    ///
    /// HTTP 200のみ成功とし、本文をテキストとして読み切る。それ以外はすべて`FetchOutcome::Err`。
    pub async fn fetch_one(&self, provider: &ProviderConfig) -> FetchOutcome {
        let start = Instant::now();

        let response = match self.client.get(&provider.url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = %provider.name, error = %e, "Status fetch failed");
                return FetchOutcome::error(e.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                provider = %provider.name,
                status = status.as_u16(),
                "Status API returned non-200"
            );
            return FetchOutcome::error(format!("HTTP {}", status.as_u16()));
        }

        match response.text().await {
            Ok(body) => {
                debug!(
                    provider = %provider.name,
                    latency_ms = start.elapsed().as_millis() as u64,
                    bytes = body.len(),
                    "Status fetch succeeded"
                );
                FetchOutcome::Ok {
                    body,
                    format: provider.format,
                }
            }
            Err(e) => {
                warn!(provider = %provider.name, error = %e, "Failed to read status body");
                FetchOutcome::error(e.to_string())
            }
        }
    }
}
