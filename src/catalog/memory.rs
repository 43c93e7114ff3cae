use async_trait::async_trait;
use parking_lot::RwLock;

use crate::errors::CatalogResult;
use crate::types::Product;

use super::{validate_collection, CatalogStore};

/// Product collection held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-validated products.
    pub fn with_products(products: Vec<Product>) -> CatalogResult<Self> {
        validate_collection(&products)?;
        Ok(Self {
            products: RwLock::new(products),
        })
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    /// snapshot of the collection
    pub(crate) fn snapshot(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    pub(crate) fn swap(&self, products: Vec<Product>) -> usize {
        let count = products.len();
        *self.products.write() = products;
        count
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.snapshot())
    }

    async fn get_product(&self, slug: &str) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().iter().find(|p| p.slug == slug).cloned())
    }

    async fn replace_all(&self, products: Vec<Product>) -> CatalogResult<usize> {
        validate_collection(&products)?;
        Ok(self.swap(products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::errors::CatalogError;

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryCatalog::with_products(vec![
            fixtures::product("zeta"),
            fixtures::product("alpha"),
            fixtures::product("mid"),
        ])
        .unwrap();

        let slugs: Vec<String> = store
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let store = InMemoryCatalog::with_products(vec![fixtures::product("p1")]).unwrap();

        assert!(store.get_product("p1").await.unwrap().is_some());
        assert!(store.get_product("missing").await.unwrap().is_none());
        assert!(matches!(
            store.require_product("missing").await,
            Err(CatalogError::NotFound { slug }) if slug == "missing"
        ));
    }

    #[tokio::test]
    async fn test_replace_all_is_all_or_nothing() {
        let store = InMemoryCatalog::with_products(vec![fixtures::product("p1")]).unwrap();

        let result = store
            .replace_all(vec![fixtures::product("p2"), fixtures::product("p2")])
            .await;
        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert!(store.get_product("p1").await.unwrap().is_some());

        let count = store
            .replace_all(vec![fixtures::product("p2"), fixtures::product("p3")])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert!(store.get_product("p1").await.unwrap().is_none());
    }
}
