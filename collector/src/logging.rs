//! ロギング初期化
//!
//! 標準エラーへの出力に加え、`STATUS_COLLECTOR_LOG_DIR` が設定されていれば
//! 日次ローテーションのファイルにも書き出す。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{CollectorError, CollectorResult};

/// ログレベル指定の環境変数
pub const LOG_LEVEL_ENV: &str = "STATUS_COLLECTOR_LOG_LEVEL";

/// ログ出力先ディレクトリの環境変数
pub const LOG_DIR_ENV: &str = "STATUS_COLLECTOR_LOG_DIR";

const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_PREFIX: &str = "status-collector.log";

/// グローバルサブスクライバーを初期化
///
/// 返されたガードはプロセス終了まで保持すること。破棄するとファイル出力が止まる。
pub fn init() -> CollectorResult<Option<WorkerGuard>> {
    let directive = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok());
    let filter = build_filter(directive.as_deref());

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| CollectorError::Internal(format!("failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// フィルターを構築（不正な指定は既定レベルにフォールバック）
fn build_filter(directive: Option<&str>) -> EnvFilter {
    match directive.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!(
                "Invalid log filter {:?} ({}), falling back to {}",
                directive, e, DEFAULT_LOG_LEVEL
            );
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        }),
        None => EnvFilter::new(DEFAULT_LOG_LEVEL),
    }
}
