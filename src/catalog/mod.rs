//! Product catalog storage.
//!
//! Products are schema-light JSON documents keyed by slug. Two backends are
//! provided: [`InMemoryCatalog`] and [`JsonFileCatalog`], which persists the
//! collection as one JSON array on disk.

pub mod file;
pub mod memory;
pub mod seed;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{CatalogError, CatalogResult, ConfigError};
use crate::payments::MAX_TENURE_MONTHS;
use crate::types::Product;

pub use file::JsonFileCatalog;
pub use memory::InMemoryCatalog;

/// Read access to the product collection plus bulk replacement for seeding.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// all products in insertion order
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// product by slug, `None` when absent
    async fn get_product(&self, slug: &str) -> CatalogResult<Option<Product>>;

    /// validate and replace the whole collection, returning the new count
    async fn replace_all(&self, products: Vec<Product>) -> CatalogResult<usize>;

    /// product by slug, `NotFound` when absent
    async fn require_product(&self, slug: &str) -> CatalogResult<Product> {
        self.get_product(slug)
            .await?
            .ok_or_else(|| CatalogError::NotFound {
                slug: slug.to_string(),
            })
    }
}

/// Where the catalog lives, parsed from a datastore uri.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatastoreLocation {
    Memory,
    File(PathBuf),
}

impl DatastoreLocation {
    /// `memory://`, `file://PATH`, or a bare filesystem path
    pub fn parse(uri: &str) -> Result<Self, ConfigError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(ConfigError::UnsupportedDatastore {
                uri: uri.to_string(),
            });
        }

        match uri.split_once("://") {
            Some(("memory", _)) => Ok(DatastoreLocation::Memory),
            Some(("file", path)) if !path.is_empty() => Ok(DatastoreLocation::File(PathBuf::from(path))),
            Some(_) => Err(ConfigError::UnsupportedDatastore {
                uri: uri.to_string(),
            }),
            None => Ok(DatastoreLocation::File(PathBuf::from(uri))),
        }
    }
}

/// Open the catalog at `location`.
pub async fn open_catalog(location: &DatastoreLocation) -> CatalogResult<Arc<dyn CatalogStore>> {
    match location {
        DatastoreLocation::Memory => Ok(Arc::new(InMemoryCatalog::new())),
        DatastoreLocation::File(path) => Ok(Arc::new(JsonFileCatalog::open(path.clone()).await?)),
    }
}

/// Check one document against the collection rules.
pub fn validate_product(product: &Product) -> CatalogResult<()> {
    let invalid = |message: &str| CatalogError::InvalidDocument {
        slug: product.slug.clone(),
        message: message.to_string(),
    };

    if product.slug.trim().is_empty() {
        return Err(invalid("slug is required"));
    }
    if product.name.trim().is_empty() {
        return Err(invalid("name is required"));
    }
    if product.variants.is_empty() {
        return Err(invalid("at least one variant is required"));
    }

    let mut skus = HashSet::new();
    for variant in &product.variants {
        if variant.sku.trim().is_empty() {
            return Err(invalid("variant sku is required"));
        }
        if !skus.insert(variant.sku.as_str()) {
            return Err(invalid(&format!("duplicate variant sku {}", variant.sku)));
        }
        if variant.price.is_negative() || variant.mrp.is_negative() {
            return Err(invalid(&format!("negative price on variant {}", variant.sku)));
        }
        if !variant.price.is_json_exact() || !variant.mrp.is_json_exact() {
            return Err(invalid(&format!("price out of range on variant {}", variant.sku)));
        }
    }

    let mut plans = HashSet::new();
    for plan in &product.emi_plans {
        if !plans.insert(plan.name.as_str()) {
            return Err(invalid(&format!("duplicate emi plan {}", plan.name)));
        }
        if plan.tenure_months == 0 {
            return Err(invalid(&format!("emi plan {} has zero tenure", plan.name)));
        }
        if plan.tenure_months > MAX_TENURE_MONTHS {
            return Err(invalid(&format!(
                "emi plan {} is longer than {} months",
                plan.name, MAX_TENURE_MONTHS
            )));
        }
        if plan.annual_interest_rate < Decimal::ZERO {
            return Err(invalid(&format!("emi plan {} has a negative rate", plan.name)));
        }
        if plan.cashback.map_or(false, |c| c.amount.is_negative()) {
            return Err(invalid(&format!("emi plan {} has a negative cashback", plan.name)));
        }
        if !plan.cashback.map_or(Money::ZERO, |c| c.amount).is_json_exact() {
            return Err(invalid(&format!("emi plan {} cashback out of range", plan.name)));
        }
    }

    Ok(())
}

/// Validate a full collection, including slug uniqueness.
pub fn validate_collection(products: &[Product]) -> CatalogResult<()> {
    let mut slugs = HashSet::new();
    for product in products {
        validate_product(product)?;
        if !slugs.insert(product.slug.as_str()) {
            return Err(CatalogError::DuplicateSlug {
                slug: product.slug.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::decimal::Money;
    use crate::types::{Attributes, Cashback, FinancingOffer, Product, Variant};

    pub fn variant(sku: &str, storage: &str, mrp: i64, price: i64) -> Variant {
        Variant {
            sku: sku.to_string(),
            slug: None,
            attributes: Attributes::new().with("storage", storage).with("color", "Black"),
            image: format!("https://img.example/{}.png", sku.to_lowercase()),
            mrp: Money::from_major(mrp),
            price: Money::from_major(price),
        }
    }

    pub fn product(slug: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: format!("Phone {}", slug),
            brand: Some("Acme".to_string()),
            slug: slug.to_string(),
            description: None,
            variants: vec![
                variant(&format!("{}-128", slug), "128GB", 79_900, 72_000),
                variant(&format!("{}-256", slug), "256GB", 89_900, 89_900),
            ],
            emi_plans: vec![
                FinancingOffer {
                    name: "3 months @ 0%".to_string(),
                    tenure_months: 3,
                    annual_interest_rate: dec!(0),
                    cashback: Some(Cashback {
                        enabled: true,
                        amount: Money::from_major(1_500),
                    }),
                    notes: None,
                },
                FinancingOffer {
                    name: "12 months @ 12%".to_string(),
                    tenure_months: 12,
                    annual_interest_rate: dec!(12),
                    cashback: None,
                    notes: Some("Backed by mutual funds".to_string()),
                },
            ],
            created_at: None,
        }
    }
}
