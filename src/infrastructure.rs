// Infrastructure layer modules
pub mod config;
pub mod fixtures_client;
pub mod logging;
pub mod record_repository;

// Re-exports
pub use config::{ConsumerConfig, ConsumerConfigError};
pub use fixtures_client::{FixturesApi, FixturesApiError, HttpFixturesClient};
pub use logging::init_logging;
pub use record_repository::{DynamoRecordRepository, RecordRepository, RecordRepositoryError};
