//! HTTPルーティング
//!
//! `GET /` のみを提供する。それ以外のパスは404を返す。

pub mod index;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// ルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::status_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
