use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::CatalogResult;
use crate::types::Product;

use super::{validate_collection, CatalogStore, InMemoryCatalog};

/// Product collection persisted as a JSON array in a single file.
///
/// Reads are served from memory; `replace_all` rewrites the file through a
/// temporary sibling and a rename, then swaps the in-memory copy.
#[derive(Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
    cache: InMemoryCatalog,
    write_lock: Mutex<()>,
}

impl JsonFileCatalog {
    /// Load the collection at `path`; a missing file is an empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let products = read_documents(&path).await?;
        validate_collection(&products)?;

        info!(path = %path.display(), count = products.len(), "opened product catalog");

        let cache = InMemoryCatalog::new();
        cache.swap(products);

        Ok(Self {
            path,
            cache,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogStore for JsonFileCatalog {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.cache.list_products().await
    }

    async fn get_product(&self, slug: &str) -> CatalogResult<Option<Product>> {
        self.cache.get_product(slug).await
    }

    async fn replace_all(&self, products: Vec<Product>) -> CatalogResult<usize> {
        validate_collection(&products)?;

        let _guard = self.write_lock.lock().await;
        write_documents(&self.path, &products).await?;
        debug!(path = %self.path.display(), count = products.len(), "rewrote product catalog");

        Ok(self.cache.swap(products))
    }
}

async fn read_documents(path: &Path) -> CatalogResult<Vec<Product>> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_documents(path: &Path, products: &[Product]) -> CatalogResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let body = serde_json::to_vec_pretty(products)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, body).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::errors::CatalogError;

    #[tokio::test]
    async fn test_missing_file_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCatalog::open(dir.path().join("products.json")).await.unwrap();

        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("products.json");

        let store = JsonFileCatalog::open(&path).await.unwrap();
        let count = store
            .replace_all(vec![fixtures::product("p1"), fixtures::product("p2")])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert!(path.exists());

        let reopened = JsonFileCatalog::open(&path).await.unwrap();
        let products = reopened.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "p1");
        assert_eq!(products, store.list_products().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileCatalog::open(&path).await,
            Err(CatalogError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_replacement_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        let store = JsonFileCatalog::open(&path).await.unwrap();
        store.replace_all(vec![fixtures::product("p1")]).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut broken = fixtures::product("p2");
        broken.variants.clear();
        assert!(store.replace_all(vec![broken]).await.is_err());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert!(store.get_product("p1").await.unwrap().is_some());
    }
}
