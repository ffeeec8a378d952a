// アプリケーション層モジュール
pub mod request_handler;

// 再エクスポート
pub use request_handler::{
    common_headers, error_response, request_body_text, success_response, HandlerError,
    RequestHandler,
};
