/// ログ基盤モジュール
///
/// Lambda環境向けの構造化ログ設定を提供する。
/// CloudWatch Logsで検索しやすいようJSON形式で出力する。
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 環境変数`RUST_LOG`（未設定時はinfo）でフィルタリングする。
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        // 他で初期化済みの場合（テスト等）は無視する
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
