//! Service layer for the student resource.
//! - Domain types and the repository abstraction live in `students`.
//! - Handlers depend on `StudentRepository`, never on a concrete store.

pub mod errors;
pub mod students;
