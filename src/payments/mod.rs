pub mod amortization;
pub mod calculator;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalculatorError, Result};
use crate::types::FinancingOffer;

pub use amortization::{AmortizationSchedule, ScheduledPayment};
pub use calculator::{compute_monthly_payment, compute_total_payable, PaymentCalculator};

/// longest plan a loan or stored offer may carry (100 years)
pub const MAX_TENURE_MONTHS: u32 = 1200;

/// one financing offer applied to one purchase price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanInput {
    pub principal: Money,
    pub tenure_months: u32,
    pub annual_rate_percent: Decimal,
}

impl LoanInput {
    /// validated loan input, tenure at most [`MAX_TENURE_MONTHS`]
    pub fn new(principal: Money, tenure_months: i64, annual_rate_percent: Decimal) -> Result<Self> {
        calculator::validate_inputs(principal, tenure_months, annual_rate_percent)?;
        let tenure_months = u32::try_from(tenure_months)
            .ok()
            .filter(|months| *months <= MAX_TENURE_MONTHS)
            .ok_or(CalculatorError::InvalidTenure {
                months: tenure_months,
            })?;

        Ok(Self {
            principal,
            tenure_months,
            annual_rate_percent,
        })
    }

    /// loan for buying at `price` under `offer`
    pub fn for_offer(price: Money, offer: &FinancingOffer) -> Result<Self> {
        Self::new(
            price,
            i64::from(offer.tenure_months),
            offer.annual_interest_rate,
        )
    }
}

/// installment quote, both amounts at currency precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub monthly_payment: Money,
    pub total_payable: Money,
}

impl PaymentResult {
    /// interest paid over the term (total payable less principal)
    pub fn total_interest(&self, principal: Money) -> Money {
        (self.total_payable - principal).max(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_input_validation() {
        assert!(LoanInput::new(Money::from_major(1_000), 12, dec!(10)).is_ok());
        assert!(LoanInput::new(Money::from_major(1_000), 12, Decimal::ZERO).is_ok());

        assert_eq!(
            LoanInput::new(Money::from_major(1_000), 0, dec!(10)),
            Err(CalculatorError::InvalidTenure { months: 0 })
        );
        assert_eq!(
            LoanInput::new(Money::from_major(1_000), i64::from(u32::MAX) + 1, dec!(10)),
            Err(CalculatorError::InvalidTenure {
                months: i64::from(u32::MAX) + 1
            })
        );
        assert!(matches!(
            LoanInput::new(Money::from_major(-5), 12, dec!(10)),
            Err(CalculatorError::InvalidPrincipal { .. })
        ));
    }

    #[test]
    fn test_loan_input_tenure_ceiling() {
        assert_eq!(
            LoanInput::new(Money::from_major(1_000), 1200, Decimal::ZERO).map(|i| i.tenure_months),
            Ok(MAX_TENURE_MONTHS)
        );
        assert_eq!(
            LoanInput::new(Money::from_major(1_000), 1201, Decimal::ZERO),
            Err(CalculatorError::InvalidTenure { months: 1201 })
        );
        assert_eq!(
            LoanInput::new(Money::from_major(1_000), 3_000_000_000, Decimal::ZERO),
            Err(CalculatorError::InvalidTenure {
                months: 3_000_000_000
            })
        );

        let offer = FinancingOffer {
            name: "forever".to_string(),
            tenure_months: u32::MAX,
            annual_interest_rate: Decimal::ZERO,
            cashback: None,
            notes: None,
        };
        assert!(LoanInput::for_offer(Money::from_major(1_000), &offer).is_err());
    }

    #[test]
    fn test_loan_input_for_offer() {
        let offer = FinancingOffer {
            name: "6 months @ 10.5%".to_string(),
            tenure_months: 6,
            annual_interest_rate: dec!(10.5),
            cashback: None,
            notes: None,
        };

        let input = LoanInput::for_offer(Money::from_major(79_900), &offer).unwrap();
        assert_eq!(input.tenure_months, 6);
        assert_eq!(input.annual_rate_percent, dec!(10.5));
        assert_eq!(input.principal, Money::from_major(79_900));
    }

    #[test]
    fn test_total_interest() {
        let result = PaymentResult {
            monthly_payment: Money::from_str_exact("8884.88").unwrap(),
            total_payable: Money::from_str_exact("106618.56").unwrap(),
        };
        assert_eq!(
            result.total_interest(Money::from_major(100_000)),
            Money::from_str_exact("6618.56").unwrap()
        );
    }
}
