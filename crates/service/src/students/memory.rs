use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::domain::{StudentFields, StudentRecord};
use super::repository::StudentRepository;
use crate::errors::ServiceError;

const ENTITY: &str = "student";

/// Process-lifetime student store held in memory.
///
/// Records are keyed by id in a `BTreeMap`, so the highest id is the last key
/// and listing is already in id order. Every mutation takes the write lock,
/// which makes "compute next id, then insert" a single step.
///
/// # Examples
/// ```
/// use service::students::{InMemoryStudentStore, StudentFields, StudentRepository};
/// let store = InMemoryStudentStore::new();
/// let mut fields = StudentFields::new();
/// fields.insert("name".into(), "Vijay Kumar".into());
/// let rec = tokio_test::block_on(store.create(fields)).unwrap();
/// assert_eq!(rec.id, 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStudentStore {
    inner: Arc<RwLock<BTreeMap<u64, StudentRecord>>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentStore {
    async fn list(&self) -> Vec<StudentRecord> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    async fn get(&self, id: u64) -> Result<StudentRecord, ServiceError> {
        let map = self.inner.read().await;
        map.get(&id).cloned().ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    #[instrument(skip(self, input), fields(field_count = input.len()))]
    async fn create(&self, input: StudentFields) -> Result<StudentRecord, ServiceError> {
        let mut map = self.inner.write().await;
        let id = match map.keys().next_back() {
            Some(max) => max.checked_add(1).ok_or(ServiceError::IdExhausted)?,
            None => 1,
        };
        let rec = StudentRecord::new(id, input);
        map.insert(id, rec.clone());
        debug!(id, "student_created");
        Ok(rec)
    }

    #[instrument(skip(self, input), fields(field_count = input.len()))]
    async fn replace(&self, id: u64, input: StudentFields) -> Result<StudentRecord, ServiceError> {
        if id == 0 {
            return Err(ServiceError::InvalidId("student ids start at 1".into()));
        }
        let rec = StudentRecord::new(id, input);
        let mut map = self.inner.write().await;
        let existed = map.insert(id, rec.clone()).is_some();
        debug!(existed, "student_replaced");
        Ok(rec)
    }

    #[instrument(skip(self, input), fields(field_count = input.len()))]
    async fn patch(&self, id: u64, input: StudentFields) -> Result<StudentRecord, ServiceError> {
        let mut map = self.inner.write().await;
        let existing = map.get_mut(&id).ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        existing.merge(input);
        debug!("student_patched");
        Ok(existing.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> bool {
        let mut map = self.inner.write().await;
        let existed = map.remove(&id).is_some();
        debug!(existed, "student_deleted");
        existed
    }
}
