use std::sync::Arc;

use service::students::StudentRepository;

/// Shared handler state; the store is constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentRepository>,
}

impl AppState {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }
}
