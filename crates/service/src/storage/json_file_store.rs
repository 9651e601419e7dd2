use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;

use super::RecordStore;
use crate::errors::ServiceError;
use crate::records::domain::Record;

/// JSON file-backed record store.
///
/// The whole collection lives in one file as a pretty-printed JSON array.
/// Every call hits the disk; nothing is cached between requests. Writes are
/// plain overwrites, so callers serialize mutations themselves.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    /// The file is not touched until the first `save`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }
}

/// Four-space indentation, non-ASCII written as-is.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Vec<Record>>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ServiceError::Storage(e.to_string())),
        };
        let records: Vec<Record> =
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Some(records))
    }

    async fn save(&self, records: &[Record]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        }
        let data = to_pretty_json(records).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    fn location(&self) -> String { self.file_path.display().to_string() }
}
