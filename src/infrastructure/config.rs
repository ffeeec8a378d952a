//! 外部APIとレコードストアの接続設定
//!
//! 本番では固定のエンドポイントとテーブル名（`Default`）を使い、
//! 環境変数からは読み込まない。別の値はテストでのみ`new`から指定する。

use thiserror::Error;
use url::Url;

/// fixtures-and-results検索APIの既定URL
pub const DEFAULT_FIXTURES_API_URL: &str =
    "https://api.england-rfu.com/fixtures-and-results/search";

/// レコード保存先の既定テーブル名
pub const DEFAULT_RECORDS_TABLE: &str = "api_responses";

/// 設定のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConsumerConfigError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// 外部APIのURLとテーブル名を持つ設定
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumerConfig {
    /// 検索APIのURL（クエリ文字列なし）
    api_url: String,
    /// レコードテーブル名
    table_name: String,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_FIXTURES_API_URL.to_string(),
            table_name: DEFAULT_RECORDS_TABLE.to_string(),
        }
    }
}

impl ConsumerConfig {
    /// 明示的な値で設定を作成（テスト用のモックサーバー等）
    ///
    /// URLはhttp/httpsスキームの絶対URLでなければならない。
    pub fn new(
        api_url: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Result<Self, ConsumerConfigError> {
        let api_url = api_url.into();
        let parsed =
            Url::parse(&api_url).map_err(|e| ConsumerConfigError::InvalidUrl(e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConsumerConfigError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            api_url,
            table_name: table_name.into(),
        })
    }

    /// 検索APIのURLを取得
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// レコードテーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ConsumerConfig::default();
        assert_eq!(
            config.api_url(),
            "https://api.england-rfu.com/fixtures-and-results/search"
        );
        assert_eq!(config.table_name(), "api_responses");
    }

    #[test]
    fn test_new_with_explicit_values() {
        let config = ConsumerConfig::new("http://localhost:8080/search", "test-table").unwrap();
        assert_eq!(config.api_url(), "http://localhost:8080/search");
        assert_eq!(config.table_name(), "test-table");
    }

    #[test]
    fn test_new_rejects_relative_url() {
        let result = ConsumerConfig::new("/fixtures/search", "table");
        assert!(matches!(result, Err(ConsumerConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_rejects_unsupported_scheme() {
        let result = ConsumerConfig::new("ftp://example.com/search", "table");
        match result {
            Err(ConsumerConfigError::InvalidUrl(msg)) => assert!(msg.contains("ftp")),
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_url_error_display() {
        let error = ConsumerConfigError::InvalidUrl("relative URL without a base".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid API URL: relative URL without a base"
        );
    }
}
