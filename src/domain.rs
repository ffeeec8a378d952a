// Domain layer modules
pub mod search_term;
pub mod stored_record;

// Re-exports
pub use search_term::{resolve_search_term, SearchTermError, DEFAULT_SEARCH_TERM};
pub use stored_record::StoredRecord;
