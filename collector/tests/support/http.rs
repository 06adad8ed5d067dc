use std::net::SocketAddr;

use status_collector::error::CollectorResult;
use status_collector::{server, AppState};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// 実ポートにバインドしたテスト用コレクターサーバー
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<CollectorResult<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// ステータスページのURL
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// コレクターを `127.0.0.1` の空きポートで起動する
pub async fn spawn_collector(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(server::serve(listener, state, async {
        let _ = rx.await;
    }));

    TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}
