//! Status Collector Server
//!
//! 複数の外部ステータスページAPIを並列に取得し、共通形式に正規化してHTMLで表示するサーバー

#![warn(missing_docs)]

/// HTTPルーティングとハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 取得・正規化パイプライン
pub mod collector;

/// エラー型定義
pub mod error;

/// ステータスAPIの並列取得
pub mod fetcher;

/// ロギング初期化ユーティリティ
pub mod logging;

/// プロバイダーごとのレスポンス正規化
pub mod normalizer;

/// HTML描画
pub mod presenter;

/// 監視対象プロバイダーのレジストリ
pub mod registry;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// アプリケーション状態
#[derive(Debug, Clone)]
pub struct AppState {
    /// ステータス収集パイプライン（共有HTTPクライアントとレジストリを保持）
    pub collector: collector::StatusCollector,
    /// ステータスページのレンダラー
    pub presenter: presenter::Presenter,
}

impl AppState {
    /// コレクターからアプリケーション状態を作成（テンプレートもここで読み込む）
    pub fn new(collector: collector::StatusCollector) -> error::CollectorResult<Self> {
        Ok(Self {
            collector,
            presenter: presenter::Presenter::new()?,
        })
    }
}
