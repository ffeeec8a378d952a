/// 外部API呼び出し1回分の記録
///
/// 呼び出しが成功するたびに新しいIDで1件作成され、書き込み後は変更されない。
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// レコードストアに保存される1件の記録
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// レコードID（UUID v4）
    id: String,
    /// 外部APIに渡した検索語
    search_term: String,
    /// 外部APIのレスポンスボディ（未加工）
    response: String,
    /// 作成時刻（UTC）
    timestamp: DateTime<Utc>,
}

impl StoredRecord {
    /// 新しいIDと現在時刻でレコードを作成
    pub fn new(search_term: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            search_term: search_term.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }

    /// 明示的な値でレコードを作成（テスト用）
    #[cfg(test)]
    pub(crate) fn with_values(
        id: impl Into<String>,
        search_term: impl Into<String>,
        response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            search_term: search_term.into(),
            response: response.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// ISO-8601形式のタイムスタンプ（例: `2024-01-01T12:00:00.123456Z`）
    pub fn timestamp_iso8601(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// レコードを消費してレスポンスボディを取り出す
    pub fn into_response(self) -> String {
        self.response
    }
}
