//! エラー型定義
//!
//! コレクター層の統一エラー型（thiserror使用）

use status_collector_common::error::CommonError;
use thiserror::Error;

/// Collector error type
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// コレクター層のResult型
pub type CollectorResult<T> = Result<T, CollectorError>;
