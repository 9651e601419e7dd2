//! Record CRUD on top of a `RecordStore`.

pub mod domain;
pub mod service;

pub use domain::{Record, RecordPatch, ACCEPTED_KEYS};
pub use service::RecordService;
