use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::errors::ServiceError;
use crate::records::domain::Record;

/// Memory-only store used in tests; `None` plays the role of a missing file.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Option<Vec<Record>>>,
}

impl InMemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self { inner: RwLock::new(Some(records)) }
    }

    /// Current contents without going through the trait.
    pub async fn snapshot(&self) -> Option<Vec<Record>> {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn load(&self) -> Result<Option<Vec<Record>>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, records: &[Record]) -> Result<(), ServiceError> {
        *self.inner.write().await = Some(records.to_vec());
        Ok(())
    }

    fn location(&self) -> String { "memory".to_string() }
}
