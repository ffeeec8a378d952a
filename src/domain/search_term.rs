/// 検索語の解決
///
/// リクエストボディから外部APIに渡す検索語を取り出す。
/// ボディが無い、または`name`が空の場合は既定の検索語を使う。
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// `name`が指定されなかった場合に使う検索語
pub const DEFAULT_SEARCH_TERM: &str = "Oxford";

/// 検索語解決のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchTermError {
    /// ボディがJSONとしてパースできない
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// JSONだがオブジェクトではない
    #[error("body is not a JSON object")]
    NotAnObject,

    /// `name`フィールドが文字列ではない
    #[error("invalid name field: {0}")]
    InvalidName(String),
}

/// 検索リクエストのボディ
#[derive(Debug, Deserialize)]
struct SearchRequest {
    #[serde(default)]
    name: Option<String>,
}

/// リクエストボディから検索語を解決する
///
/// # 分岐
/// - ボディなし / 空文字列 → `DEFAULT_SEARCH_TERM`
/// - JSONとしてパース不可 → `SearchTermError::InvalidJson`
/// - JSONオブジェクト以外 → `SearchTermError::NotAnObject`
/// - `name`が文字列以外 → `SearchTermError::InvalidName`
/// - `name`が欠落 / null / 空文字列 → `DEFAULT_SEARCH_TERM`
/// - それ以外 → `name`の値
pub fn resolve_search_term(raw_body: Option<&str>) -> Result<String, SearchTermError> {
    let body = match raw_body {
        Some(body) if !body.is_empty() => body,
        _ => return Ok(DEFAULT_SEARCH_TERM.to_string()),
    };

    let value: Value =
        serde_json::from_str(body).map_err(|e| SearchTermError::InvalidJson(e.to_string()))?;

    // 構造体へのデシリアライズは配列も受け付けてしまうため先にオブジェクトか確認する
    if !value.is_object() {
        return Err(SearchTermError::NotAnObject);
    }

    let request: SearchRequest =
        serde_json::from_value(value).map_err(|e| SearchTermError::InvalidName(e.to_string()))?;

    match request.name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Ok(DEFAULT_SEARCH_TERM.to_string()),
    }
}
