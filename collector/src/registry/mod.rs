//! プロバイダーレジストリ
//!
//! 監視対象プロバイダーの不変な一覧。起動時に一度だけ構築し、リクエスト間で共有する。

use std::collections::HashSet;
use std::sync::Arc;

use status_collector_common::{config::CollectorConfig, error::CommonError, types::ProviderConfig};

use crate::error::CollectorResult;

/// プロバイダーレジストリ
///
/// 登録順を保持し、その順序で表示される。クローンは内部の一覧を共有する。
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Arc<Vec<ProviderConfig>>,
}

impl ProviderRegistry {
    /// プロバイダー一覧からレジストリを作成
    ///
    /// 名前の重複、空の名前・URLはエラーになる。
    pub fn new(providers: Vec<ProviderConfig>) -> CollectorResult<Self> {
        let mut seen = HashSet::new();
        for provider in &providers {
            if provider.name.trim().is_empty() {
                return Err(CommonError::Validation(
                    "provider name must not be empty".to_string(),
                )
                .into());
            }
            if provider.url.trim().is_empty() {
                return Err(CommonError::Validation(format!(
                    "provider '{}' has an empty url",
                    provider.name
                ))
                .into());
            }
            if !seen.insert(provider.name.as_str()) {
                return Err(CommonError::Validation(format!(
                    "duplicate provider name: {}",
                    provider.name
                ))
                .into());
            }
        }

        Ok(Self {
            providers: Arc::new(providers),
        })
    }

    /// 設定からレジストリを作成
    pub fn from_config(config: &CollectorConfig) -> CollectorResult<Self> {
        Self::new(config.providers.clone())
    }

    /// 登録順にプロバイダーを走査
    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter()
    }

    /// 登録済みプロバイダー数
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// 登録が空か
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
