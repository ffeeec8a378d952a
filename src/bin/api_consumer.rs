/// fixtures-and-results検索 HTTP Lambdaエントリポイント
///
/// API Gateway / Function URL経由のリクエストから検索語を取り出し、
/// 検索APIの結果をDynamoDBに記録してそのまま返却する。
use aws_sdk_dynamodb::Client as DynamoDbClient;
use fixtures_consumer::application::{error_response, HandlerError, RequestHandler};
use fixtures_consumer::infrastructure::{
    init_logging, ConsumerConfig, DynamoRecordRepository, HttpFixturesClient,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tokio::sync::OnceCell;
use tracing::{error, info};

type ConsumerHandler = RequestHandler<HttpFixturesClient, DynamoRecordRepository>;

/// RequestHandlerの静的インスタンス
///
/// Lambda warm start時にHTTPクライアントとDynamoDBクライアントを再利用するため、
/// 一度初期化したハンドラーを静的に保持する。
static HANDLER: OnceCell<ConsumerHandler> = OnceCell::const_new();

/// RequestHandlerを取得（初期化されていなければ初期化）
async fn get_handler() -> Result<&'static ConsumerHandler, HandlerError> {
    HANDLER
        .get_or_try_init(|| async {
            let config = ConsumerConfig::default();

            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let dynamodb_client = DynamoDbClient::new(&aws_config);

            let fixtures_client = HttpFixturesClient::new(&config)?;
            let record_repo =
                DynamoRecordRepository::new(dynamodb_client, config.table_name().to_string());

            info!(
                api_url = config.api_url(),
                table = config.table_name(),
                "RequestHandlerを初期化"
            );

            Ok::<_, HandlerError>(RequestHandler::new(fixtures_client, record_repo))
        })
        .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("fixtures consumer Lambda関数を初期化");

    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// 処理結果にかかわらず常にレスポンスを返し、Lambdaの実行自体は失敗させない。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    match get_handler().await {
        Ok(consumer) => Ok(consumer.handle_request(&request).await),
        Err(err) => {
            error!(
                category = err.category(),
                error = %err,
                "ハンドラー初期化失敗"
            );
            Ok(error_response(&err))
        }
    }
}
