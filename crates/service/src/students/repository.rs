use async_trait::async_trait;

use super::domain::{StudentFields, StudentRecord};
use crate::errors::ServiceError;

/// Storage abstraction for student records.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All records in ascending id order.
    async fn list(&self) -> Vec<StudentRecord>;
    async fn get(&self, id: u64) -> Result<StudentRecord, ServiceError>;
    /// Store under `max id + 1` (or 1 when empty).
    async fn create(&self, fields: StudentFields) -> Result<StudentRecord, ServiceError>;
    /// Upsert: full replacement whether or not `id` existed.
    async fn replace(&self, id: u64, fields: StudentFields) -> Result<StudentRecord, ServiceError>;
    /// Merge into an existing record.
    async fn patch(&self, id: u64, fields: StudentFields) -> Result<StudentRecord, ServiceError>;
    /// Returns whether a record existed.
    async fn delete(&self, id: u64) -> bool;
}
