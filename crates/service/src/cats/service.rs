use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::cats::model::{Cat, CatChanges, NewCat};
use crate::cats::repository::CatRepository;
use crate::errors::ServiceError;

/// Application service for cats: stamps ids and timestamps on creation and
/// otherwise hands calls straight to the repository.
pub struct CatService {
    repo: Arc<dyn CatRepository>,
}

impl CatService {
    pub fn new(repo: Arc<dyn CatRepository>) -> Self { Self { repo } }

    pub async fn get_all(&self) -> Vec<Cat> {
        let cats = self.repo.get_all().await;
        info!(count = cats.len(), "list cats");
        cats
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Cat> { self.repo.get_by_id(id).await }

    /// Assign a fresh UUID and identical `created_at`/`updated_at`, then insert.
    #[instrument(skip(self, new_cat), fields(name = %new_cat.name))]
    pub async fn create(&self, new_cat: NewCat) -> Result<Cat, ServiceError> {
        let cat = new_cat.into_cat(Uuid::new_v4().to_string(), Utc::now());
        self.repo.insert(cat).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: &str, changes: CatChanges) -> Result<Cat, ServiceError> {
        changes.validate()?;
        self.repo.update(id, changes).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.repo.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cats::repository::FileCatRepository;
    use std::path::PathBuf;

    async fn setup_service() -> Result<(CatService, PathBuf), ServiceError> {
        let tmp = std::env::temp_dir().join(format!("cat_service_{}.json", Uuid::new_v4()));
        let repo = FileCatRepository::open(&tmp).await?;
        Ok((CatService::new(Arc::new(repo)), tmp))
    }

    fn mittens() -> NewCat {
        NewCat {
            name: "Mittens".into(),
            sex: "Male".into(),
            age: 2,
            breed: "Bengal".into(),
            colour: "Brown".into(),
            likes: vec!["chicken".into()],
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() -> Result<(), anyhow::Error> {
        let (svc, tmp) = setup_service().await?;
        let created = svc.create(mittens()).await?;
        assert!(!created.id.is_empty());
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.name, "Mittens");
        assert_eq!(svc.get_by_id(&created.id).await, Some(created));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_unique() -> Result<(), anyhow::Error> {
        let (svc, tmp) = setup_service().await?;
        let a = svc.create(mittens()).await?;
        let b = svc.create(NewCat { name: "Socks".into(), ..mittens() }).await?;
        assert_ne!(a.id, b.id);
        assert_eq!(svc.get_all().await.len(), 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_duplicate_name_conflicts() -> Result<(), anyhow::Error> {
        let (svc, tmp) = setup_service().await?;
        svc.create(mittens()).await?;
        let res = svc.create(mittens()).await;
        assert!(matches!(res, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.get_all().await.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_validates_before_touching_store() -> Result<(), anyhow::Error> {
        let (svc, tmp) = setup_service().await?;
        let created = svc.create(mittens()).await?;
        let res = svc
            .update(&created.id, CatChanges { name: Some(" ".into()), ..Default::default() })
            .await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get_by_id(&created.id).await, Some(created));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_lookup_is_absent() -> Result<(), anyhow::Error> {
        let (svc, tmp) = setup_service().await?;
        let created = svc.create(mittens()).await?;
        svc.delete(&created.id).await?;
        assert!(svc.get_by_id(&created.id).await.is_none());
        assert!(matches!(svc.delete(&created.id).await, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
