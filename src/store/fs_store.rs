use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::base::{PageStore, StoreError};
use crate::models::{PageSummary, Slug};

/// File extension of page files.
pub const PAGE_EXTENSION: &str = "txt";

/// Stores each page as `<dir>/<slug>.txt`. The directory listing is the page index.
pub struct FsPageStore {
    dir: PathBuf,
}

impl FsPageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, slug: &Slug) -> PathBuf {
        self.dir.join(format!("{}.{}", slug, PAGE_EXTENSION))
    }

    fn map_err(slug: &Slug, path: &Path, e: std::io::Error) -> StoreError {
        if e.kind() == ErrorKind::NotFound {
            StoreError::NotFound(slug.clone())
        } else {
            StoreError::io(path, e)
        }
    }
}

#[async_trait]
impl PageStore for FsPageStore {
    async fn list(&self) -> Result<Vec<PageSummary>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;

        let mut slugs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::io(&path, e))?;
            if !file_type.is_file() {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()).and_then(Slug::parse) {
                Some(slug) => slugs.push(slug),
                None => warn!("Skipping page file with unusable name: {}", path.display()),
            }
        }

        slugs.sort();
        debug!("Listed {} pages in {}", slugs.len(), self.dir.display());
        Ok(slugs.iter().map(PageSummary::from).collect())
    }

    async fn read(&self, slug: &Slug) -> Result<String, StoreError> {
        let path = self.path_for(slug);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Self::map_err(slug, &path, e))
    }

    async fn write(&self, slug: &Slug, content: &str) -> Result<(), StoreError> {
        let path = self.path_for(slug);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| StoreError::io(&path, e))
    }

    async fn delete(&self, slug: &Slug) -> Result<(), StoreError> {
        let path = self.path_for(slug);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| Self::map_err(slug, &path, e))
    }
}
