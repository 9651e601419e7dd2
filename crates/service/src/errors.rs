use thiserror::Error;

/// Failures surfaced by the record service.
///
/// Display output is the exact message returned to HTTP clients.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(vec![msg.into()]) }

    pub fn store_missing(location: &str) -> Self {
        Self::NotFound(format!("Data file not found at {}", location))
    }

    pub fn id_not_found(id: &str) -> Self {
        Self::NotFound(format!("ID not found in existing data: {}", id))
    }

    pub fn duplicate_id() -> Self { Self::Conflict("ID already exists".into()) }
}
