use std::time::Duration;

use serde_json::json;
use status_collector_common::types::{ProviderConfig, StatusFormat};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// ハングするプロバイダーの応答遅延
#[allow(dead_code)]
pub const HANG_DELAY: Duration = Duration::from_secs(10);

/// 典型的な4種類の上流を1つのモックサーバーに登録する
///
/// - `/statusio`: Statuspage形式の正常応答
/// - `/aws`: 進行中イベントが1件あるAWS形式
/// - `/missing`: 404
/// - `/hang`: `HANG_DELAY` だけ遅れて応答
#[allow(dead_code)]
pub async fn mount_upstreams(mock: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/statusio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": {"name": "Example", "updated_at": "2024-03-04T05:06:07Z"},
            "status": {"indicator": "minor", "description": "Partially Degraded Service"}
        })))
        .mount(mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/aws"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_events": [
                {"details": "Increased API error rates & latency", "date": "1706832000"}
            ],
            "archive": []
        })))
        .mount(mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/hang"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": {"indicator": "none"}}))
                .set_delay(HANG_DELAY),
        )
        .mount(mock)
        .await;
}

/// モックサーバー上のパスを指すプロバイダー設定
#[allow(dead_code)]
pub fn provider(
    mock: &MockServer,
    name: &str,
    route: &str,
    format: StatusFormat,
) -> ProviderConfig {
    ProviderConfig::new(
        name,
        format!("{}{}", mock.uri(), route),
        format,
        format!("https://status.{}.example.com/", name.to_lowercase()),
    )
}
