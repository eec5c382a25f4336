//! Store Module
//!
//! Persistence of student records in a document store.
//!
//! Two backends implement [`StudentStore`]:
//! - [`MongoStore`] - MongoDB collection, used in production
//! - [`MemoryStore`] - in-process document collection, used in tests and local runs

mod memory;
mod mongo;


use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DeleteResult, Student, StudentPayload};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

// == Public Constants ==
/// Name of the collection holding student documents
pub const STUDENTS_COLLECTION: &str = "students";

// == Store Error ==
/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A driver-level failure (network, write, decode)
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Convenience Result type for storage operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Student Store ==
/// Persistent collection of student records.
///
/// Implementations are shared across request handlers and must be safe for
/// concurrent use. No ordering is guaranteed between concurrent mutations.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Returns every record in storage-native order.
    async fn list(&self) -> StoreResult<Vec<Student>>;

    /// Persists a new record with a generated id and timestamps.
    async fn create(&self, payload: StudentPayload) -> StoreResult<Student>;

    /// Removes the record with the given id, if any.
    ///
    /// An id that matches nothing (including a malformed one) is not an error.
    async fn delete(&self, id: &str) -> StoreResult<DeleteResult>;

    /// Replaces the supplied fields of the record with the given id.
    ///
    /// Returns `None` when no record matches.
    async fn update(&self, id: &str, patch: StudentPayload) -> StoreResult<Option<Student>>;

    /// Returns records whose practical work is done and that carry a
    /// non-empty photo.
    async fn with_work_and_photo(&self) -> StoreResult<Vec<Student>>;
}
