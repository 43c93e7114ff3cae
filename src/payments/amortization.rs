use serde::Serialize;

use crate::decimal::{Money, Rate};
use crate::errors::Result;

use super::{LoanInput, PaymentCalculator};

/// scheduled payment in amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// equal-installment amortization schedule
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub tenure_months: u32,
    pub monthly_payment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(input: &LoanInput) -> Result<Self> {
        let quote = PaymentCalculator::new().quote(input)?;
        let emi = quote.monthly_payment;
        let monthly_rate = Rate::from_percentage(input.annual_rate_percent)
            .monthly_rate()
            .as_decimal();

        let mut payments = Vec::new();
        let mut balance = input.principal;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;

        for i in 1..=input.tenure_months {
            let interest_portion = balance * monthly_rate;
            let is_last = i == input.tenure_months;

            // last installment clears whatever rounding left behind
            let (payment_amount, principal_portion) = if is_last {
                (balance + interest_portion, balance)
            } else {
                let principal_portion = (emi - interest_portion).min(balance);
                (principal_portion + interest_portion, principal_portion)
            };

            cumulative_interest += interest_portion;
            cumulative_principal += principal_portion;
            let ending_balance = balance - principal_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
                cumulative_principal,
            });

            balance = ending_balance;
        }

        let total_payment = payments.iter().map(|p| p.payment_amount).sum();

        Ok(Self {
            principal: input.principal,
            tenure_months: input.tenure_months,
            monthly_payment: emi,
            payments,
            total_interest: cumulative_interest,
            total_payment,
        })
    }

    /// get payment for specific period (1-based)
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        payment_number
            .checked_sub(1)
            .and_then(|idx| self.payments.get(idx as usize))
    }

    /// remaining balance after payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_equal_installments_schedule() {
        let input = LoanInput::new(Money::from_major(100_000), 12, dec!(12)).unwrap();
        let schedule = AmortizationSchedule::generate(&input).unwrap();

        assert_eq!(schedule.payments.len(), 12);
        assert_eq!(schedule.monthly_payment, Money::from_str_exact("8884.88").unwrap());

        let first = &schedule.payments[0];
        assert_eq!(first.beginning_balance, input.principal);
        assert_eq!(first.interest_portion, Money::from_major(1_000));
        assert_eq!(first.principal_portion, Money::from_str_exact("7884.88").unwrap());

        // every installment but the last equals the EMI
        for payment in &schedule.payments[..11] {
            assert_eq!(payment.payment_amount, schedule.monthly_payment);
        }

        let last = &schedule.payments[11];
        assert_eq!(last.ending_balance, Money::ZERO);
        assert!((last.payment_amount - schedule.monthly_payment).abs() < Money::ONE);

        assert_eq!(last.cumulative_principal, input.principal);
        assert_eq!(schedule.total_payment, input.principal + schedule.total_interest);
    }

    #[test]
    fn test_interest_declines_each_month() {
        let input = LoanInput::new(Money::from_major(250_000), 24, dec!(15)).unwrap();
        let schedule = AmortizationSchedule::generate(&input).unwrap();

        for i in 1..schedule.payments.len() {
            assert!(schedule.payments[i].interest_portion < schedule.payments[i - 1].interest_portion);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let input = LoanInput::new(Money::from_major(1_000), 3, Decimal::ZERO).unwrap();
        let schedule = AmortizationSchedule::generate(&input).unwrap();

        assert_eq!(schedule.total_interest, Money::ZERO);
        assert_eq!(schedule.payments[0].payment_amount, Money::from_str_exact("333.33").unwrap());
        assert_eq!(schedule.payments[1].payment_amount, Money::from_str_exact("333.33").unwrap());
        assert_eq!(schedule.payments[2].payment_amount, Money::from_str_exact("333.34").unwrap());
        assert_eq!(schedule.total_payment, Money::from_major(1_000));
    }

    #[test]
    fn test_longest_allowed_tenure() {
        let input = LoanInput::new(Money::from_major(120_000), 1200, Decimal::ZERO).unwrap();
        let schedule = AmortizationSchedule::generate(&input).unwrap();

        assert_eq!(schedule.payments.len(), 1200);
        assert_eq!(schedule.monthly_payment, Money::from_major(100));
        assert_eq!(schedule.balance_after_payment(1200), Money::ZERO);
    }

    #[test]
    fn test_balance_lookup() {
        let input = LoanInput::new(Money::from_major(12_000), 12, Decimal::ZERO).unwrap();
        let schedule = AmortizationSchedule::generate(&input).unwrap();

        assert_eq!(schedule.balance_after_payment(0), Money::from_major(12_000));
        assert_eq!(schedule.balance_after_payment(1), Money::from_major(11_000));
        assert_eq!(schedule.balance_after_payment(12), Money::ZERO);
        assert!(schedule.get_payment(13).is_none());
    }
}
