use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Generic JSON file-backed document store.
///
/// Keeps one document `D` in memory and rewrites the whole file after every
/// mutation. There is no journal: a crash during a write can leave a truncated
/// file behind.
pub struct JsonDocumentStore<D> {
    inner: RwLock<D>,
    file_path: PathBuf,
}

impl<D> JsonDocumentStore<D>
where
    D: Serialize + DeserializeOwned + Default + Clone + Send + Sync,
{
    /// Open the document at `path`. A missing file is created holding `D::default()`;
    /// an unreadable or malformed file is an error.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }

        let doc: D = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => D::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("{}: {e}", file_path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty = D::default();
                write_document(&file_path, &empty).await?;
                info!(path = %file_path.display(), "initialized empty document");
                empty
            }
            Err(e) => return Err(ServiceError::Storage(format!("{}: {e}", file_path.display()))),
        };

        Ok(Arc::new(Self { inner: RwLock::new(doc), file_path }))
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Snapshot of the current document, as last loaded or saved.
    pub async fn load(&self) -> D {
        self.inner.read().await.clone()
    }

    /// Run `f` against the document under the read lock.
    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&D) -> R,
    {
        let doc = self.inner.read().await;
        f(&doc)
    }

    /// Replace the whole document and persist it. Counterpart of [`load`](Self::load)
    /// for callers that rebuild the document themselves (seeding, imports);
    /// incremental changes go through [`update`](Self::update).
    pub async fn save(&self, doc: D) -> Result<(), ServiceError> {
        let mut guard = self.inner.write().await;
        write_document(&self.file_path, &doc).await?;
        *guard = doc;
        Ok(())
    }

    /// Apply a mutation and persist it.
    ///
    /// `f` works on a copy; the in-memory document only changes once the file
    /// write succeeded, so an error from `f` or from the write leaves both memory
    /// and disk at the last saved state. The write lock is held across the file
    /// write, which serializes concurrent mutations.
    pub async fn update<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut D) -> Result<R, ServiceError>,
    {
        let mut guard = self.inner.write().await;
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        write_document(&self.file_path, &draft).await?;
        *guard = draft;
        Ok(out)
    }
}

async fn write_document<D: Serialize>(path: &Path, doc: &D) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(doc).map_err(ServiceError::storage)?;
    fs::write(path, &data).await.map_err(ServiceError::storage)?;
    debug!(path = %path.display(), bytes = data.len(), "document written");
    Ok(())
}
