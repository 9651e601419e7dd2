//! Storage abstractions for service layer
//!
//! The whole record collection is loaded and saved as one unit. Stores are
//! injected into `RecordService` as `Arc<dyn RecordStore>`.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::records::domain::Record;

pub mod in_memory;
pub mod json_file_store;

pub use in_memory::InMemoryStore;
pub use json_file_store::JsonFileStore;

/// Trait abstraction for record collection storage.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Full collection, or `None` when the store has never been written.
    async fn load(&self) -> Result<Option<Vec<Record>>, ServiceError>;
    /// Replace the full collection.
    async fn save(&self, records: &[Record]) -> Result<(), ServiceError>;
    /// Where the data lives, for error messages.
    fn location(&self) -> String;
}
