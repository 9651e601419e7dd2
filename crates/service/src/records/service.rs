use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::records::domain::{self, Record};
use crate::storage::RecordStore;

/// Application service encapsulating the record rules.
///
/// Every operation reads the whole collection from the store; mutations write
/// it back. `guard` makes each load-modify-save cycle exclusive so concurrent
/// requests in this process cannot lose each other's writes.
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    guard: RwLock<()>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store, guard: RwLock::new(()) }
    }

    async fn load_existing(&self) -> Result<Vec<Record>, ServiceError> {
        self.store
            .load()
            .await?
            .ok_or_else(|| ServiceError::store_missing(&self.store.location()))
    }

    /// Full collection; `NotFound` if the store was never written.
    pub async fn list(&self) -> Result<Vec<Record>, ServiceError> {
        let _read = self.guard.read().await;
        self.load_existing().await
    }

    pub async fn get(&self, id: &str) -> Result<Record, ServiceError> {
        let _read = self.guard.read().await;
        let records = self.load_existing().await?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::id_not_found(id))
    }

    /// Append a new record. A missing store counts as empty.
    ///
    /// Mutations take the raw request body: the store is consulted before the
    /// body is parsed, so a missing or unreadable store wins over a bad body.
    #[instrument(skip_all)]
    pub async fn create(&self, body: &[u8]) -> Result<Record, ServiceError> {
        let _write = self.guard.write().await;
        let mut records = self.store.load().await?.unwrap_or_default();
        let record = domain::decode_new_record(domain::parse_body(body)?)?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(ServiceError::duplicate_id());
        }
        records.push(record.clone());
        self.store.save(&records).await?;
        info!(id = %record.id, total = records.len(), "record created");
        Ok(record)
    }

    /// Merge the payload's fields into the record with the same id.
    #[instrument(skip_all)]
    pub async fn update(&self, body: &[u8]) -> Result<Record, ServiceError> {
        let _write = self.guard.write().await;
        let mut records = self.load_existing().await?;
        let patch = domain::decode_patch(domain::parse_body(body)?)?;
        let existing = records
            .iter_mut()
            .find(|r| r.id == patch.id)
            .ok_or_else(|| ServiceError::id_not_found(&patch.id))?;
        existing.apply(patch);
        let updated = existing.clone();
        self.store.save(&records).await?;
        info!(id = %updated.id, "record updated");
        Ok(updated)
    }

    /// Remove every record carrying the payload's id; returns that id.
    #[instrument(skip_all)]
    pub async fn delete(&self, body: &[u8]) -> Result<String, ServiceError> {
        let _write = self.guard.write().await;
        let mut records = self.load_existing().await?;
        let target = domain::decode_record_id(domain::parse_body(body)?)?;
        if !records.iter().any(|r| r.id == target.id) {
            return Err(ServiceError::id_not_found(&target.id));
        }
        let before = records.len();
        records.retain(|r| r.id != target.id);
        self.store.save(&records).await?;
        info!(id = %target.id, removed = before - records.len(), "record deleted");
        Ok(target.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use serde_json::{json, Value};

    fn body(v: Value) -> Vec<u8> {
        serde_json::to_vec(&v).unwrap()
    }

    fn john_json() -> Value {
        json!({"id": "1", "name": "John", "age": 30, "class": "6"})
    }

    fn john() -> Vec<u8> { body(john_json()) }

    fn seeded() -> (Arc<InMemoryStore>, RecordService) {
        let store = Arc::new(InMemoryStore::with_records(vec![]));
        let svc = RecordService::new(store.clone());
        (store, svc)
    }

    #[tokio::test]
    async fn create_then_get_returns_same_record() -> Result<(), anyhow::Error> {
        let (_, svc) = seeded();
        let created = svc.create(&john()).await?;
        assert_eq!(serde_json::to_value(&created)?, john_json());
        let found = svc.get("1").await?;
        assert_eq!(found, created);
        Ok(())
    }

    #[tokio::test]
    async fn create_on_absent_store_creates_it() -> Result<(), anyhow::Error> {
        let store = Arc::new(InMemoryStore::new());
        let svc = RecordService::new(store.clone());
        assert!(matches!(svc.list().await, Err(ServiceError::NotFound(_))));
        svc.create(&john()).await?;
        assert_eq!(store.snapshot().await.map(|r| r.len()), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_without_write() -> Result<(), anyhow::Error> {
        let (store, svc) = seeded();
        svc.create(&john()).await?;
        let err = svc
            .create(&body(json!({"id": "1", "name": "Other", "age": 5, "class": "1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.to_string(), "ID already exists");
        let records = store.snapshot().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "John");
        Ok(())
    }

    #[tokio::test]
    async fn bad_shape_leaves_store_unchanged() -> Result<(), anyhow::Error> {
        let (store, svc) = seeded();
        svc.create(&john()).await?;
        let before = store.snapshot().await;

        let missing = svc.create(&body(json!({"id": "2", "name": "Ann", "age": 9}))).await;
        assert!(matches!(missing, Err(ServiceError::Validation(_))));
        let extra = svc
            .create(&body(json!({"id": "2", "name": "Ann", "age": 9, "class": "3", "x": 1})))
            .await;
        assert!(matches!(extra, Err(ServiceError::Validation(_))));

        assert_eq!(store.snapshot().await, before);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let (store, svc) = seeded();
        svc.create(&john()).await?;
        let before = store.snapshot().await;
        let err = svc.update(&body(json!({"id": "42", "name": "Nobody"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "ID not found in existing data: 42");
        assert_eq!(store.snapshot().await, before);
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_preserves_other_fields() -> Result<(), anyhow::Error> {
        let (_, svc) = seeded();
        svc.create(&john()).await?;
        let updated = svc.update(&body(json!({"id": "1", "name": "John Updated"}))).await?;
        assert_eq!(
            serde_json::to_value(&updated)?,
            json!({"id": "1", "name": "John Updated", "age": 30, "class": "6"})
        );
        assert_eq!(svc.get("1").await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn mutations_need_existing_store() {
        let svc = RecordService::new(Arc::new(InMemoryStore::new()));
        assert!(matches!(svc.update(&john()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(&body(json!({"id": "1"}))).await, Err(ServiceError::NotFound(_))));
        let err = svc.get("1").await.unwrap_err();
        assert_eq!(err.to_string(), "Data file not found at memory");
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() -> Result<(), anyhow::Error> {
        let (store, svc) = seeded();
        svc.create(&john()).await?;
        svc.create(&body(json!({"id": "2", "name": "Ann", "age": 9, "class": "3"}))).await?;

        let deleted = svc.delete(&body(json!({"id": "1"}))).await?;
        assert_eq!(deleted, "1");
        assert_eq!(store.snapshot().await.unwrap().len(), 1);
        assert!(matches!(svc.get("1").await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.get("2").await?.name, "Ann");
        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_store_unchanged() -> Result<(), anyhow::Error> {
        let (store, svc) = seeded();
        svc.create(&john()).await?;
        let before = store.snapshot().await;
        assert!(matches!(svc.delete(&body(json!({"id": "7"}))).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(&body(json!({}))).await, Err(ServiceError::Validation(_))));
        assert_eq!(store.snapshot().await, before);
        Ok(())
    }

    #[tokio::test]
    async fn missing_store_wins_over_bad_body() {
        let svc = RecordService::new(Arc::new(InMemoryStore::new()));
        assert!(matches!(svc.update(b"{bad").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(b"{bad").await, Err(ServiceError::NotFound(_))));
        // create treats a missing store as empty, so the body is what fails
        assert!(matches!(svc.create(b"{bad").await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_do_not_lose_writes() -> Result<(), anyhow::Error> {
        let (store, svc) = seeded();
        let svc = Arc::new(svc);
        let mut handles = Vec::new();
        for i in 0..32 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move {
                svc.create(&body(json!({"id": i.to_string(), "name": "n", "age": i, "class": "c"}))).await
            }));
        }
        for h in handles {
            h.await??;
        }
        assert_eq!(store.snapshot().await.unwrap().len(), 32);
        Ok(())
    }
}
