//! axumサーバー起動・シャットダウンハンドリング

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::error::{CollectorError, CollectorResult};
use crate::AppState;

/// axumサーバーを起動し、Ctrl+C または SIGTERM を受けるまで待機する
pub async fn run(state: AppState, bind_addr: &str) -> CollectorResult<()> {
    let listener = TcpListener::bind(bind_addr).await.map_err(|e| {
        CollectorError::Internal(format!("failed to bind to {}: {}", bind_addr, e))
    })?;

    info!("Status collector listening on {}", bind_addr);

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// バインド済みのリスナーでルーターを提供する
///
/// `shutdown` が完了すると新規接続の受付を止め、処理中のリクエストを待って終了する。
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> CollectorResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = crate::api::create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| CollectorError::Internal(format!("server error: {}", e)))
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
