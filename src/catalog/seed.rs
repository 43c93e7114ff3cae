use std::path::Path;

use hourglass_rs::SafeTimeProvider;
use tracing::info;

use crate::errors::CatalogResult;
use crate::types::Product;

use super::CatalogStore;

/// Read a seed document: a JSON array of products.
pub async fn load_seed(path: &Path) -> CatalogResult<Vec<Product>> {
    let bytes = tokio::fs::read(path).await?;
    let products: Vec<Product> = serde_json::from_slice(&bytes)?;
    info!(path = %path.display(), count = products.len(), "loaded seed document");
    Ok(products)
}

/// Fill in `created_at` on products that do not carry one.
pub fn stamp_created_at(products: &mut [Product], time: &SafeTimeProvider) {
    let now = time.now();
    for product in products.iter_mut().filter(|p| p.created_at.is_none()) {
        product.created_at = Some(now);
    }
}

/// Replace the whole collection with `products`.
pub async fn seed(store: &dyn CatalogStore, products: Vec<Product>) -> CatalogResult<usize> {
    let count = store.replace_all(products).await?;
    info!(count, "seeded products");
    Ok(count)
}
