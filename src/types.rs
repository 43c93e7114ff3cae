use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a product document
pub type ProductId = Uuid;

/// Variant attributes such as `storage` and `color`.
///
/// Values are plain strings; the catalog only ever displays them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub const STORAGE: &'static str = "storage";
    pub const COLOR: &'static str = "color";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn storage(&self) -> Option<&str> {
        self.get(Self::STORAGE)
    }

    pub fn color(&self) -> Option<&str> {
        self.get(Self::COLOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// button label, e.g. "256GB • Black"; falls back to all values in key order
    pub fn label(&self) -> String {
        match (self.storage(), self.color()) {
            (Some(storage), Some(color)) => format!("{} • {}", storage, color),
            _ => self.0.values().cloned().collect::<Vec<_>>().join(" • "),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// purchasable configuration of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub image: String,
    pub mrp: Money,
    pub price: Money,
}

/// cashback attached to a financing offer, displayed only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cashback {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub amount: Money,
}

/// named EMI plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingOffer {
    pub name: String,
    pub tenure_months: u32,
    /// annual rate in percent (10.5 for 10.5%)
    pub annual_interest_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback: Option<Cashback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FinancingOffer {
    /// cashback amount when the offer carries an enabled cashback
    pub fn active_cashback(&self) -> Option<Money> {
        self.cashback.filter(|c| c.enabled).map(|c| c.amount)
    }
}

/// product document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub emi_plans: Vec<FinancingOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// first listed variant, the default selection
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    pub fn variant(&self, sku: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.sku == sku)
    }

    pub fn plan(&self, name: &str) -> Option<&FinancingOffer> {
        self.emi_plans.iter().find(|p| p.name == name)
    }
}
