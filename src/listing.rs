//! Product-card figures for the catalog page.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::decimal::Money;
use crate::types::{Product, Variant};

/// shown when the first variant has no image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400";

/// Whole-percent discount of `price` against `mrp`; 0 unless `mrp > price`.
pub fn discount_percent(mrp: Money, price: Money) -> u32 {
    if mrp <= price || mrp.is_zero() {
        return 0;
    }

    let pct = (mrp - price).as_decimal() / mrp.as_decimal() * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// amount saved against mrp, zero when not discounted
pub fn savings(mrp: Money, price: Money) -> Money {
    (mrp - price).max(Money::ZERO)
}

/// price figures for one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTag {
    pub price: Money,
    pub mrp: Money,
    pub discount_percent: u32,
    pub savings: Money,
}

impl PriceTag {
    pub fn for_variant(variant: &Variant) -> Self {
        Self {
            price: variant.price,
            mrp: variant.mrp,
            discount_percent: discount_percent(variant.mrp, variant.price),
            savings: savings(variant.mrp, variant.price),
        }
    }
}

/// one card on the product list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// "starting from" price of the first variant
    pub price: Money,
    pub mrp: Money,
    pub discount_percent: u32,
    pub image: String,
    pub href: String,
}

impl ProductSummary {
    /// Card for `product`, linking under `api_base_url`.
    ///
    /// A product without variants shows a zero price and the placeholder image.
    pub fn from_product(product: &Product, api_base_url: &str) -> Self {
        let variant = product.default_variant();
        let price = variant.map(|v| v.price).unwrap_or(Money::ZERO);
        let mrp = variant
            .map(|v| v.mrp)
            .filter(|m| !m.is_zero())
            .unwrap_or(price);
        let image = variant
            .map(|v| v.image.as_str())
            .filter(|i| !i.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
            .to_string();

        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price,
            mrp,
            discount_percent: discount_percent(mrp, price),
            image,
            href: format!(
                "{}/api/products/{}",
                api_base_url.trim_end_matches('/'),
                product.slug
            ),
        }
    }
}
