use thiserror::Error;

/// Failure kinds shared by the store, repository and service layers.
///
/// The `Display` text of the first three variants is the client-facing message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn duplicate_name(name: &str) -> Self {
        Self::Conflict(format!("cat with the name '{name}' already exists"))
    }

    pub fn cat_not_found(id: &str) -> Self {
        Self::NotFound(format!("Can't find cat with the id '{id}'"))
    }

    pub fn storage(e: impl std::fmt::Display) -> Self {
        Self::Storage(e.to_string())
    }
}
