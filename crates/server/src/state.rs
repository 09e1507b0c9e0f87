use std::sync::Arc;

use service::cats::CatService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub cats: Arc<CatService>,
}

impl AppState {
    pub fn new(cats: CatService) -> Self {
        Self { cats: Arc::new(cats) }
    }
}
