//! エラー型定義
//!
//! 共通レイヤーの統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source (file / environment) error
    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// 共通レイヤーのResult型
pub type CommonResult<T> = Result<T, CommonError>;
