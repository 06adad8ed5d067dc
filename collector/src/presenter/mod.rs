//! HTMLプレゼンター
//!
//! 正規化済みレコードの一覧を `templates/index.html` で1枚のページに描画する。
//! レコードの値はすべて外部由来のため、テンプレートは自動エスケープで描画する。

use std::sync::Arc;

use minijinja::{context, Environment};
use status_collector_common::types::{now_timestamp, StatusRecord};

use crate::error::CollectorResult;

const INDEX_TEMPLATE: &str = "index.html";

/// ステータスページのレンダラー
///
/// テンプレートは起動時に一度だけ読み込む。クローンは環境を共有する。
#[derive(Debug, Clone)]
pub struct Presenter {
    env: Arc<Environment<'static>>,
}

impl Presenter {
    /// テンプレートを読み込んでレンダラーを作成
    pub fn new() -> CollectorResult<Self> {
        let mut env = Environment::new();
        env.add_filter("status_class", status_class);
        env.add_template(INDEX_TEMPLATE, include_str!("templates/index.html"))?;

        Ok(Self { env: Arc::new(env) })
    }

    /// レコード一覧をHTMLページとして描画
    ///
    /// 行の順序は引数の順序（レジストリの登録順）に従う。
    pub fn render_page(&self, records: &[StatusRecord]) -> CollectorResult<String> {
        let template = self.env.get_template(INDEX_TEMPLATE)?;
        let html = template.render(context! {
            generated_at => now_timestamp(),
            records => records,
        })?;
        Ok(html)
    }
}

/// ステータス文字列に対応するCSSクラス
///
/// Statuspageの indicator (none/minor/major/critical/maintenance) と
/// 正規化で付与する値の両方を扱う。
fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "none" | "operational" => "operational",
        "minor" => "degraded",
        "major" | "disrupted" => "partial",
        "critical" | "error" => "major",
        "maintenance" => "maintenance",
        _ => "unknown",
    }
}
