use super::catalog_store::CatalogStore;
use super::fs_backend::FsBackend;
use std::path::{Path, PathBuf};

/// Production store: JSON tables under a data directory.
pub type FileStore = CatalogStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        CatalogStore::with_backend(FsBackend::new(root))
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }
}
