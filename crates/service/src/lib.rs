//! Service layer for the record store.
//! - `storage`: whole-collection persistence behind the `RecordStore` trait.
//! - `records`: typed payload decoding and the CRUD operations.
//! - Clear error types mapped to HTTP statuses by the server crate.

pub mod errors;
pub mod storage;
pub mod records;
