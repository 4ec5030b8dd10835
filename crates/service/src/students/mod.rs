//! Student resource: domain types, repository trait and in-memory store.

pub mod domain;
pub mod memory;
pub mod repository;

pub use domain::{FieldValue, StudentFields, StudentRecord};
pub use memory::InMemoryStudentStore;
pub use repository::StudentRepository;
