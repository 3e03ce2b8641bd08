use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::fs_store::FsPageStore;
use crate::models::{PageSummary, Slug};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page '{0}' not found")]
    NotFound(Slug),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The PageStore trait abstracts page persistence (list, read, write, delete).
///
/// Writes are unsynchronized: concurrent writers to the same slug race and the
/// last one to reach the backend wins.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// All pages, ordered by slug. Fails as a whole, never with partial results.
    async fn list(&self) -> Result<Vec<PageSummary>, StoreError>;
    async fn read(&self, slug: &Slug) -> Result<String, StoreError>;
    /// Creates the page or overwrites it in full.
    async fn write(&self, slug: &Slug, content: &str) -> Result<(), StoreError>;
    async fn delete(&self, slug: &Slug) -> Result<(), StoreError>;
}

/// Creates the filesystem page store rooted at `pages_dir`, creating the
/// directory when it does not exist yet.
pub async fn create_store(pages_dir: &Path) -> Result<Arc<dyn PageStore>, StoreError> {
    if tokio::fs::metadata(pages_dir).await.is_err() {
        info!("Creating pages directory {}", pages_dir.display());
        tokio::fs::create_dir_all(pages_dir)
            .await
            .map_err(|e| StoreError::io(pages_dir, e))?;
    }
    Ok(Arc::new(FsPageStore::new(pages_dir)))
}
