use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::cats::model::{Cat, CatChanges, CatDocument};
use crate::errors::ServiceError;
use crate::storage::JsonDocumentStore;

/// Collection invariants (unique names, existing ids) live behind this trait.
#[async_trait]
pub trait CatRepository: Send + Sync {
    async fn get_all(&self) -> Vec<Cat>;
    async fn get_by_id(&self, id: &str) -> Option<Cat>;
    async fn insert(&self, cat: Cat) -> Result<Cat, ServiceError>;
    async fn update(&self, id: &str, changes: CatChanges) -> Result<Cat, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

/// Repository backed by a single JSON document on disk.
#[derive(Clone)]
pub struct FileCatRepository {
    store: Arc<JsonDocumentStore<CatDocument>>,
}

impl FileCatRepository {
    pub fn new(store: Arc<JsonDocumentStore<CatDocument>>) -> Self {
        Self { store }
    }

    /// Open (or create) the document at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonDocumentStore::<CatDocument>::open(path).await?;
        let count = store.read(|doc| doc.cats.len()).await;
        info!(path = %store.path().display(), count, "cat document opened");
        Ok(Self::new(store))
    }
}

#[async_trait]
impl CatRepository for FileCatRepository {
    async fn get_all(&self) -> Vec<Cat> {
        let cats = self.store.load().await.cats;
        debug!(count = cats.len(), "loaded cats");
        cats
    }

    async fn get_by_id(&self, id: &str) -> Option<Cat> {
        self.store.read(|doc| doc.cats.iter().find(|c| c.id == id).cloned()).await
    }

    async fn insert(&self, cat: Cat) -> Result<Cat, ServiceError> {
        let inserted = self
            .store
            .update(|doc| {
                if doc.cats.iter().any(|c| c.name == cat.name) {
                    return Err(ServiceError::duplicate_name(&cat.name));
                }
                doc.cats.push(cat.clone());
                Ok(cat)
            })
            .await?;
        info!(id = %inserted.id, name = %inserted.name, "cat inserted");
        Ok(inserted)
    }

    async fn update(&self, id: &str, changes: CatChanges) -> Result<Cat, ServiceError> {
        let updated = self
            .store
            .update(|doc| {
                // Name collisions are checked before existence; the record's own
                // current name does not count as a collision.
                if let Some(name) = changes.name.as_deref() {
                    if doc.cats.iter().any(|c| c.name == name && c.id != id) {
                        return Err(ServiceError::duplicate_name(name));
                    }
                }
                let cat = doc
                    .cats
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| ServiceError::cat_not_found(id))?;
                changes.apply(cat, Utc::now());
                Ok(cat.clone())
            })
            .await?;
        info!(id = %updated.id, "cat updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store
            .update(|doc| {
                let idx = doc
                    .cats
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or_else(|| ServiceError::cat_not_found(id))?;
                doc.cats.remove(idx);
                Ok(())
            })
            .await?;
        info!(%id, "cat deleted");
        Ok(())
    }
}
