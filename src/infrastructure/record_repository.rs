/// DynamoDBに検索結果レコードを保存するリポジトリ
///
/// 1回の呼び出しにつき1件を新規挿入するのみで、更新・削除・読み取りは行わない。
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::StoredRecord;

/// レコードリポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordRepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),
}

/// レコード永続化用トレイト
///
/// 実際のDynamoDBとテスト用モックを差し替えられるようにする。
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// レコードを新規アイテムとして保存
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`
    /// * 失敗時は`Err(RecordRepositoryError)`
    async fn save(&self, record: &StoredRecord) -> Result<(), RecordRepositoryError>;
}

/// RecordRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoRecordRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// レコードテーブル名
    table_name: String,
}

impl DynamoRecordRepository {
    /// 新しいDynamoRecordRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - レコードテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// レコード保存用の属性マップを構築
    ///
    /// すべて文字列属性で、`id`がパーティションキー。
    pub fn build_item(record: &StoredRecord) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S(record.id().to_string()));
        item.insert(
            "search_term".to_string(),
            AttributeValue::S(record.search_term().to_string()),
        );
        item.insert(
            "response".to_string(),
            AttributeValue::S(record.response().to_string()),
        );
        item.insert(
            "timestamp".to_string(),
            AttributeValue::S(record.timestamp_iso8601()),
        );
        item
    }
}

#[async_trait]
impl RecordRepository for DynamoRecordRepository {
    async fn save(&self, record: &StoredRecord) -> Result<(), RecordRepositoryError> {
        info!(
            record_id = record.id(),
            search_term = record.search_term(),
            table = %self.table_name,
            "DynamoDBにレコードを保存"
        );

        // 新規挿入のみ（同じIDが存在する場合は書き込まない）
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::build_item(record)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => {
                info!(record_id = record.id(), "DynamoDBへの保存に成功");
                Ok(())
            }
            Err(err) => {
                let service_error = err.into_service_error();
                error!(
                    record_id = record.id(),
                    error = %service_error,
                    "DynamoDBへの保存に失敗"
                );
                Err(RecordRepositoryError::WriteError(service_error.to_string()))
            }
        }
    }
}
