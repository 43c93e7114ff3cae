//! Variant and EMI-plan selection on the product page.
//!
//! The page holds a [`ProductSelection`]; every mutation is followed by a call
//! to [`derive`] (via [`ProductSelection::payment`]) so the displayed payment
//! never drifts from the current choice.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::decimal::Money;
use crate::errors::{Result, SelectionError};
use crate::listing::PriceTag;
use crate::payments::{LoanInput, PaymentCalculator, PaymentResult};
use crate::types::{FinancingOffer, Product, Variant};

/// currently chosen variant and offer, either may be unset
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection<'a> {
    pub variant: Option<&'a Variant>,
    pub offer: Option<&'a FinancingOffer>,
}

/// Payment for a selection; `None` until both variant and offer are chosen.
///
/// Cashback is never netted against the total.
pub fn derive(selection: &Selection<'_>) -> Result<Option<PaymentResult>> {
    match (selection.variant, selection.offer) {
        (Some(variant), Some(offer)) => {
            let input = LoanInput::for_offer(variant.price, offer)?;
            PaymentCalculator::new().quote(&input).map(Some)
        }
        _ => Ok(None),
    }
}

/// one row of the EMI plan list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferQuote {
    pub name: String,
    pub tenure_months: u32,
    pub annual_interest_rate: Decimal,
    pub monthly_payment: Money,
    /// monthly payment rounded to whole units, as shown on the plan card
    pub monthly_display: Money,
    pub total_payable: Money,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashback: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub selected: bool,
}

/// Selection state for one product page.
#[derive(Debug, Clone)]
pub struct ProductSelection {
    product: Product,
    variant_idx: usize,
    offer_idx: Option<usize>,
}

impl ProductSelection {
    /// Start on the first variant with no plan chosen.
    pub fn new(product: Product) -> std::result::Result<Self, SelectionError> {
        if product.variants.is_empty() {
            return Err(SelectionError::NoVariants {
                slug: product.slug.clone(),
            });
        }

        Ok(Self {
            product,
            variant_idx: 0,
            offer_idx: None,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn variant(&self) -> &Variant {
        &self.product.variants[self.variant_idx]
    }

    pub fn offer(&self) -> Option<&FinancingOffer> {
        self.offer_idx.map(|idx| &self.product.emi_plans[idx])
    }

    pub fn select_variant(&mut self, sku: &str) -> std::result::Result<&Variant, SelectionError> {
        let idx = self
            .product
            .variants
            .iter()
            .position(|v| v.sku == sku)
            .ok_or_else(|| SelectionError::UnknownVariant {
                sku: sku.to_string(),
            })?;
        self.variant_idx = idx;
        Ok(self.variant())
    }

    pub fn select_offer(&mut self, name: &str) -> std::result::Result<&FinancingOffer, SelectionError> {
        let idx = self
            .product
            .emi_plans
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| SelectionError::UnknownOffer {
                name: name.to_string(),
            })?;
        self.offer_idx = Some(idx);
        Ok(&self.product.emi_plans[idx])
    }

    pub fn clear_offer(&mut self) {
        self.offer_idx = None;
    }

    pub fn selection(&self) -> Selection<'_> {
        Selection {
            variant: Some(self.variant()),
            offer: self.offer(),
        }
    }

    /// payment for the current selection
    pub fn payment(&self) -> Result<Option<PaymentResult>> {
        derive(&self.selection())
    }

    pub fn price_tag(&self) -> PriceTag {
        PriceTag::for_variant(self.variant())
    }

    /// cashback of the chosen plan, displayed beside the total
    pub fn cashback(&self) -> Option<Money> {
        self.offer().and_then(FinancingOffer::active_cashback)
    }

    /// quote every plan at the current variant's price
    pub fn offer_quotes(&self) -> Result<Vec<OfferQuote>> {
        let price = self.variant().price;

        self.product
            .emi_plans
            .iter()
            .enumerate()
            .map(|(idx, offer)| {
                let input = LoanInput::for_offer(price, offer)?;
                let quote = PaymentCalculator::new().quote(&input)?;

                Ok(OfferQuote {
                    name: offer.name.clone(),
                    tenure_months: offer.tenure_months,
                    annual_interest_rate: offer.annual_interest_rate,
                    monthly_payment: quote.monthly_payment,
                    monthly_display: quote.monthly_payment.round_whole(),
                    total_payable: quote.total_payable,
                    total_interest: quote.total_interest(price),
                    cashback: offer.active_cashback(),
                    notes: offer.notes.clone(),
                    selected: self.offer_idx == Some(idx),
                })
            })
            .collect()
    }
}
