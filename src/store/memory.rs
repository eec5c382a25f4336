//! In-Memory Store
//!
//! Document collection kept in process memory. Records keep insertion order.

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::models::{now, DeleteResult, Student, StudentPayload};
use crate::store::{StoreResult, StudentStore};

// == Memory Store ==
/// Student collection guarded by an async read/write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Student>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Student>> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, payload: StudentPayload) -> StoreResult<Student> {
        let student = Student::new(ObjectId::new().to_hex(), payload, now());
        self.records.write().await.push(student.clone());
        Ok(student)
    }

    async fn delete(&self, id: &str) -> StoreResult<DeleteResult> {
        let mut records = self.records.write().await;
        match records.iter().position(|s| s.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    async fn update(&self, id: &str, patch: StudentPayload) -> StoreResult<Option<Student>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|s| s.id == id).map(|student| {
            student.apply(patch, now());
            student.clone()
        }))
    }

    async fn with_work_and_photo(&self) -> StoreResult<Vec<Student>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|s| s.has_work_and_photo())
            .cloned()
            .collect())
    }
}
