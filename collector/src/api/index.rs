//! ステータスページハンドラー
//!
//! リクエストごとに全プロバイダーを取得し直してHTMLを返す。

use axum::{extract::State, response::Html};
use tracing::error;

use crate::AppState;

/// 描画に失敗した場合のページ（外部由来の値を含まない）
const RENDER_FAILURE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Service Status</title></head>
<body><p>Status page is temporarily unavailable.</p></body>
</html>"#;

/// GET / - 集約ステータスページ
///
/// 収集全体が失敗してもシステムエラーレコードを描画するため、常に200を返す。
pub async fn status_page(State(state): State<AppState>) -> Html<String> {
    let records = state.collector.collect_or_system_error().await;
    match state.presenter.render_page(&records) {
        Ok(html) => Html(html),
        Err(e) => {
            error!(error = %e, "Failed to render status page");
            Html(RENDER_FAILURE_PAGE.to_string())
        }
    }
}
