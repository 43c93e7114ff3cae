use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("invalid tenure: {months} months")]
    InvalidTenure {
        months: i64,
    },

    #[error("invalid principal: {principal}, must not be negative")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate_percent}%, must not be negative")]
    InvalidRate {
        rate_percent: Decimal,
    },

    #[error("payment calculation did not produce a finite amount: {message}")]
    NonFiniteResult {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CalculatorError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("product not found: {slug}")]
    NotFound {
        slug: String,
    },

    #[error("invalid product document {slug:?}: {message}")]
    InvalidDocument {
        slug: String,
        message: String,
    },

    #[error("duplicate product slug: {slug}")]
    DuplicateSlug {
        slug: String,
    },

    #[error("datastore io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("datastore document error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unsupported datastore uri: {uri}")]
    UnsupportedDatastore {
        uri: String,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        key: String,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("product {slug} has no variants")]
    NoVariants {
        slug: String,
    },

    #[error("unknown variant sku: {sku}")]
    UnknownVariant {
        sku: String,
    },

    #[error("unknown emi plan: {name}")]
    UnknownOffer {
        name: String,
    },
}
