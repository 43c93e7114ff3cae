pub mod catalog;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod listing;
pub mod payments;
pub mod selection;
pub mod server;
pub mod types;

// re-export key types
pub use catalog::{open_catalog, CatalogStore, DatastoreLocation, InMemoryCatalog, JsonFileCatalog};
pub use config::AppConfig;
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, CatalogError, ConfigError, Result, SelectionError};
pub use listing::{discount_percent, PriceTag, ProductSummary};
pub use payments::{
    compute_monthly_payment, compute_total_payable, AmortizationSchedule, LoanInput, MAX_TENURE_MONTHS,
    PaymentCalculator, PaymentResult, ScheduledPayment,
};
pub use selection::{derive, OfferQuote, ProductSelection, Selection};
pub use server::Server;
pub use types::{Attributes, Cashback, FinancingOffer, Product, ProductId, Variant};

// re-export time provider for seeding
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
