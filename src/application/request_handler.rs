// 検索リクエストハンドラー
//
// 1回の呼び出しで 検索語の解決 → 検索API呼び出し → レコード保存 を順に行い、
// 成功時は検索APIのボディをそのまま、失敗時は {"message": ...} を返す。

use lambda_http::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, RequestExt, Response};
use thiserror::Error;
use tracing::{error, info, info_span, Instrument};

use crate::domain::{resolve_search_term, SearchTermError, StoredRecord};
use crate::infrastructure::{
    FixturesApi, FixturesApiError, RecordRepository, RecordRepositoryError,
};

/// ハンドラーのエラー型
///
/// 呼び出し元へのレスポンスのステータスとメッセージはこの分類だけで決まり、
/// 詳細（各バリアントの文字列）はログにのみ出力する。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandlerError {
    /// リクエストボディが解釈できない
    #[error("リクエストボディ不正: {0}")]
    MalformedInput(String),

    /// 検索API呼び出しの失敗
    #[error("検索API呼び出し失敗: status={status:?}, {detail}")]
    UpstreamError {
        /// 上流のステータスコード（受信できなかった場合はNone）
        status: Option<u16>,
        detail: String,
    },

    /// レコードストアへの書き込み失敗
    #[error("レコード保存失敗: {0}")]
    StorageError(String),

    /// 上記以外の想定外エラー
    #[error("内部エラー: {0}")]
    InternalError(String),
}

impl HandlerError {
    /// レスポンスのステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::UpstreamError {
                status: Some(status),
                ..
            } => StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 呼び出し元に返すメッセージ
    pub fn public_message(&self) -> &'static str {
        match self {
            HandlerError::UpstreamError { .. } => "API request failed",
            HandlerError::StorageError(_) => "Database operation failed",
            HandlerError::MalformedInput(_) | HandlerError::InternalError(_) => {
                "Internal server error"
            }
        }
    }

    /// ログ用のエラー分類名
    pub fn category(&self) -> &'static str {
        match self {
            HandlerError::MalformedInput(_) => "malformed_input",
            HandlerError::UpstreamError { .. } => "upstream",
            HandlerError::StorageError(_) => "storage",
            HandlerError::InternalError(_) => "internal",
        }
    }
}

impl From<SearchTermError> for HandlerError {
    fn from(err: SearchTermError) -> Self {
        HandlerError::MalformedInput(err.to_string())
    }
}

impl From<FixturesApiError> for HandlerError {
    fn from(err: FixturesApiError) -> Self {
        match err {
            FixturesApiError::ClientBuild(msg) => HandlerError::InternalError(msg),
            other => HandlerError::UpstreamError {
                status: other.status(),
                detail: other.to_string(),
            },
        }
    }
}

impl From<RecordRepositoryError> for HandlerError {
    fn from(err: RecordRepositoryError) -> Self {
        HandlerError::StorageError(err.to_string())
    }
}

/// すべてのレスポンスに付与するヘッダー
///
/// - Content-Type: application/json
/// - Access-Control-Allow-Origin: *
pub fn common_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers
}

/// ステータスとボディからレスポンスを構築
fn build_response(status: StatusCode, body: String) -> Response<Body> {
    let mut response = Response::new(Body::Text(body));
    *response.status_mut() = status;
    *response.headers_mut() = common_headers();
    response
}

/// 成功レスポンス（200、ボディは検索APIのレスポンスそのまま）
pub fn success_response(body: String) -> Response<Body> {
    build_response(StatusCode::OK, body)
}

/// エラーレスポンス（`{"message": ...}`）
pub fn error_response(err: &HandlerError) -> Response<Body> {
    let body = serde_json::json!({ "message": err.public_message() }).to_string();
    build_response(err.status_code(), body)
}

/// リクエストボディをテキストとして取り出す
///
/// API Gatewayがbase64で渡すバイナリボディはUTF-8として解釈する。
pub fn request_body_text(body: &Body) -> Result<Option<&str>, HandlerError> {
    match body {
        Body::Empty => Ok(None),
        Body::Text(text) => Ok(Some(text.as_str())),
        Body::Binary(bytes) => std::str::from_utf8(bytes)
            .map(Some)
            .map_err(|e| HandlerError::MalformedInput(e.to_string())),
        _ => Err(HandlerError::MalformedInput(
            "unsupported body kind".to_string(),
        )),
    }
}

/// 検索リクエストを処理するハンドラー
///
/// 検索APIクライアントとレコードリポジトリはプロセス内で使い回す前提で、
/// 呼び出しごとの可変状態は持たない。
pub struct RequestHandler<F, R>
where
    F: FixturesApi,
    R: RecordRepository,
{
    /// 検索APIクライアント
    fixtures_api: F,
    /// レコードリポジトリ
    record_repo: R,
}

impl<F, R> RequestHandler<F, R>
where
    F: FixturesApi,
    R: RecordRepository,
{
    /// 新しいRequestHandlerを作成
    pub fn new(fixtures_api: F, record_repo: R) -> Self {
        Self {
            fixtures_api,
            record_repo,
        }
    }

    /// Lambda HTTPリクエストを処理する
    ///
    /// LambdaコンテキストがあればリクエストIDをspanに付与する。
    pub async fn handle_request(&self, request: &Request) -> Response<Body> {
        let request_id = request
            .lambda_context_ref()
            .map(|ctx| ctx.request_id.clone())
            .unwrap_or_default();

        let span = info_span!("invocation", request_id = %request_id);

        async {
            match request_body_text(request.body()) {
                Ok(body) => self.handle(body).await,
                Err(err) => Self::respond_error(err),
            }
        }
        .instrument(span)
        .await
    }

    /// リクエストボディを処理してレスポンスを返す
    ///
    /// エラーはすべてここでレスポンスに変換されるため、呼び出し元には常に
    /// 整形済みのレスポンスが返る。
    pub async fn handle(&self, body: Option<&str>) -> Response<Body> {
        info!("Function execution started");

        match self.process(body).await {
            Ok(payload) => success_response(payload),
            Err(err) => Self::respond_error(err),
        }
    }

    /// 検索語解決 → 検索API呼び出し → レコード保存
    ///
    /// # 戻り値
    /// * `Ok(String)` - 検索APIのレスポンスボディ
    /// * `Err(HandlerError)` - いずれかの段階の失敗（以降の段階は実行しない）
    pub async fn process(&self, body: Option<&str>) -> Result<String, HandlerError> {
        let search_term = resolve_search_term(body)?;
        info!(search_term = %search_term, "検索語を解決");

        let response = self.fixtures_api.search(&search_term).await?;

        // 保存に失敗した場合、取得済みのレスポンスは返さない
        let record = StoredRecord::new(search_term, response);
        self.record_repo.save(&record).await?;

        info!(
            record_id = record.id(),
            length = record.response().len(),
            "メッセージ処理完了"
        );

        Ok(record.into_response())
    }

    /// エラーをログ出力してエラーレスポンスに変換
    fn respond_error(err: HandlerError) -> Response<Body> {
        error!(
            category = err.category(),
            status = err.status_code().as_u16(),
            error = %err,
            "リクエスト処理エラー"
        );
        error_response(&err)
    }
}
