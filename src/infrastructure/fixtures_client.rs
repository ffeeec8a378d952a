// FixturesClient - fixtures-and-results検索API用HTTPクライアント
//
// 検索語をクエリパラメータ`name`に付けてGETし、レスポンスボディを
// そのまま文字列で返す。再試行は行わない。
// リクエスト全体のタイムアウトは設定せず、Lambdaの実行期限に任せる。

use super::config::ConsumerConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// 接続タイムアウト（秒）
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 検索API呼び出しのエラー型
///
/// # エラー種別
/// - `HttpStatus`: 2xx以外のステータス
/// - `Network`: DNS解決失敗・接続拒否・タイムアウトなど
/// - `ClientBuild`: HTTPクライアントの構築失敗
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FixturesApiError {
    /// HTTPエラー（ステータスコード付き）
    #[error("HTTPエラー: status={status}, body={body}")]
    HttpStatus {
        /// HTTPステータスコード
        status: u16,
        /// レスポンスボディ（ログ用）
        body: String,
    },

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// クライアント構築エラー
    #[error("HTTPクライアント構築エラー: {0}")]
    ClientBuild(String),
}

impl FixturesApiError {
    /// 上流から返されたステータスコード（受信できた場合のみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            FixturesApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 検索API呼び出し用トレイト
///
/// 実際のHTTPクライアントとテスト用モックを差し替えられるようにする。
#[async_trait]
pub trait FixturesApi: Send + Sync {
    /// 検索語で検索APIを呼び出す
    ///
    /// # 戻り値
    /// * `Ok(String)` - 2xxレスポンスのボディ（未加工）
    /// * `Err(FixturesApiError)` - ステータスエラーまたはネットワークエラー
    async fn search(&self, search_term: &str) -> Result<String, FixturesApiError>;
}

/// reqwestによる検索APIクライアント
///
/// Lambdaのウォームスタート間で使い回すため、内部のコネクションプールを保持する。
#[derive(Debug, Clone)]
pub struct HttpFixturesClient {
    /// HTTPクライアント
    client: Client,
    /// 検索APIのURL
    api_url: String,
}

impl HttpFixturesClient {
    /// 設定からクライアントを作成
    pub fn new(config: &ConsumerConfig) -> Result<Self, FixturesApiError> {
        info!(api_url = config.api_url(), "HttpFixturesClientを初期化");

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| FixturesApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url().to_string(),
        })
    }

    /// 検索語をエスケープしたリクエストURLを構築
    ///
    /// 非予約文字以外はパーセントエンコードされる（空白は`%20`）。
    pub fn search_url(&self, search_term: &str) -> String {
        let separator = if self.api_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}name={}",
            self.api_url,
            separator,
            urlencoding::encode(search_term)
        )
    }
}

#[async_trait]
impl FixturesApi for HttpFixturesClient {
    #[instrument(skip(self))]
    async fn search(&self, search_term: &str) -> Result<String, FixturesApiError> {
        let url = self.search_url(search_term);
        info!(url = %url, "検索APIを呼び出し");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = %e, timeout = e.is_timeout(), connect = e.is_connect(), "検索APIリクエスト失敗");
            FixturesApiError::Network(e.to_string())
        })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "検索APIがエラーステータスを返却");
            return Err(FixturesApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let content = response.text().await.map_err(|e| {
            error!(error = %e, "検索APIレスポンスの読み取りに失敗");
            FixturesApiError::Network(e.to_string())
        })?;

        debug!(status = %status, "検索APIステータス確認");
        info!(length = content.len(), "検索APIレスポンス受信");

        Ok(content)
    }
}
