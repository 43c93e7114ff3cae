use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};

use super::{LoanInput, PaymentResult};

/// Fixed-installment (EMI) payment calculator.
///
/// Stateless; every quote depends only on its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentCalculator;

impl PaymentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// monthly installment and total payable for one loan
    pub fn quote(&self, input: &LoanInput) -> Result<PaymentResult> {
        let tenure = i64::from(input.tenure_months);
        let monthly_payment =
            compute_monthly_payment(input.principal, tenure, input.annual_rate_percent)?;
        let total_payable = compute_total_payable(monthly_payment, tenure)?;

        Ok(PaymentResult {
            monthly_payment,
            total_payable,
        })
    }
}

/// Monthly installment for an amortizing loan, rounded to currency precision.
///
/// `annual_rate_percent` is a percentage (12 for 12% a year). A zero rate
/// spreads the principal evenly over the tenure.
pub fn compute_monthly_payment(
    principal: Money,
    tenure_months: i64,
    annual_rate_percent: Decimal,
) -> Result<Money> {
    validate_inputs(principal, tenure_months, annual_rate_percent)?;

    let months = Decimal::from(tenure_months);
    let rate = Rate::from_percentage(annual_rate_percent);
    let monthly_rate = rate.monthly_rate().as_decimal();

    // a rate below decimal resolution is indistinguishable from zero
    if rate.is_zero() || monthly_rate.is_zero() {
        return straight_line(principal, months);
    }

    // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let factor = compound_factor(Decimal::ONE + monthly_rate, tenure_months)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return straight_line(principal, months);
    }

    // ratio first: factor alone may be near the decimal limit for long tenures
    let emi = factor
        .checked_div(denominator)
        .and_then(|ratio| principal.as_decimal().checked_mul(monthly_rate)?.checked_mul(ratio))
        .ok_or_else(|| non_finite("installment overflowed"))?;

    Ok(Money::from_decimal(emi))
}

/// Total paid over the tenure: installment times months, rounded.
pub fn compute_total_payable(monthly_payment: Money, tenure_months: i64) -> Result<Money> {
    if tenure_months < 1 {
        return Err(CalculatorError::InvalidTenure {
            months: tenure_months,
        });
    }

    monthly_payment
        .checked_mul(Decimal::from(tenure_months))
        .ok_or_else(|| non_finite("total payable overflowed"))
}

pub(crate) fn validate_inputs(
    principal: Money,
    tenure_months: i64,
    annual_rate_percent: Decimal,
) -> Result<()> {
    if tenure_months < 1 {
        return Err(CalculatorError::InvalidTenure {
            months: tenure_months,
        });
    }
    if principal.is_negative() {
        return Err(CalculatorError::InvalidPrincipal { principal });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(CalculatorError::InvalidRate {
            rate_percent: annual_rate_percent,
        });
    }
    Ok(())
}

fn straight_line(principal: Money, months: Decimal) -> Result<Money> {
    principal
        .as_decimal()
        .checked_div(months)
        .map(Money::from_decimal)
        .ok_or_else(|| non_finite("principal / tenure"))
}

/// (base)^periods by repeated squaring
fn compound_factor(base: Decimal, periods: i64) -> Result<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut remaining = periods;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result
                .checked_mul(square)
                .ok_or_else(|| non_finite("compound factor overflowed"))?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square
                .checked_mul(square)
                .ok_or_else(|| non_finite("compound factor overflowed"))?;
        }
    }

    Ok(result)
}

fn non_finite(message: &str) -> CalculatorError {
    CalculatorError::NonFiniteResult {
        message: message.to_string(),
    }
}
