//! The amortization engine.
//!
//! Produces a fixed-payment (French / annuity) table where every monetary
//! value is rounded to cents as soon as it is computed, and the last period
//! pays off whatever balance is left so the table always closes at zero.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::client::ClientInfo;
use crate::error::{InputField, ScheduleError};
use crate::loan::{LoanParameters, LoanRequest};

/// Tax charged on the interest portion of every payment (16%).
pub const VAT_RATE: Decimal = dec!(0.16);

/// Used to derive the monthly rate from the annual one.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// One period of the amortization table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// 1-based period number.
    pub period: u32,
    /// Balance owed before this payment.
    pub opening_balance: Decimal,
    /// Portion of the payment that reduces the balance.
    pub principal_portion: Decimal,
    /// Interest charged on the opening balance.
    pub interest: Decimal,
    /// VAT charged on the interest.
    pub interest_tax: Decimal,
    /// Sum of principal, interest and tax for the period.
    pub total_payment: Decimal,
    /// Balance owed after this payment.
    pub closing_balance: Decimal,
}

/// Column sums of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_capital: Decimal,
    pub total_interest: Decimal,
    pub total_interest_tax: Decimal,
    pub total_payments: Decimal,
}

impl Totals {
    fn add(&mut self, row: &PaymentRow) {
        self.total_capital += row.principal_portion;
        self.total_interest += row.interest;
        self.total_interest_tax += row.interest_tax;
        self.total_payments += row.total_payment;
    }
}

/// A complete amortization table for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub client: ClientInfo,
    pub loan: LoanParameters,
    /// The annuity payment (before tax) rounded to cents. Informational: rows
    /// are built from the unrounded value.
    pub fixed_payment: Decimal,
    pub payments: Vec<PaymentRow>,
    pub totals: Totals,
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Monthly rate applied to each period.
pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
    annual_rate / MONTHS_PER_YEAR
}

/// Fixed payment of an annuity: PMT = P * [i(1 + i)^n] / [(1 + i)^n - 1]
///
/// # Errors
///
/// Fails when `(1 + i)^n` overflows or when the rate is so small that the
/// denominator vanishes at decimal precision.
pub fn fixed_payment(
    principal: Decimal,
    monthly_rate: Decimal,
    periods: u32,
) -> Result<Decimal, ScheduleError> {
    let out_of_range =
        || ScheduleError::incomplete(InputField::AnnualRate, "is out of the computable range");

    let i_plus_1_pow_n = (Decimal::ONE + monthly_rate)
        .checked_powu(periods.into())
        .ok_or_else(out_of_range)?;
    let numerator = monthly_rate
        .checked_mul(i_plus_1_pow_n)
        .and_then(|upper| principal.checked_mul(upper))
        .ok_or_else(out_of_range)?;

    numerator
        .checked_div(i_plus_1_pow_n - Decimal::ONE)
        .ok_or_else(out_of_range)
}

/// Validates a raw request and computes its amortization table.
///
/// # Errors
///
/// Returns [`ScheduleError::IncompleteInput`] if any of the three numeric
/// inputs is missing or out of range. No partial table is produced.
pub fn compute_schedule(
    request: &LoanRequest,
    client: ClientInfo,
) -> Result<AmortizationResult, ScheduleError> {
    let loan = LoanParameters::try_from(request)?;
    amortize(&loan, client)
}

/// Computes the amortization table for already validated parameters.
pub fn amortize(
    loan: &LoanParameters,
    client: ClientInfo,
) -> Result<AmortizationResult, ScheduleError> {
    let periods = loan.periods();
    let rate = monthly_rate(loan.annual_rate());
    let payment = fixed_payment(loan.principal(), rate, periods)?;

    debug!(
        principal = %loan.principal(),
        annual_rate = %loan.annual_rate(),
        periods,
        payment = %payment,
        "computing amortization table"
    );

    let mut payments = Vec::with_capacity(periods as usize);
    let mut totals = Totals::default();
    let mut balance = loan.principal();

    for period in 1..=periods {
        let opening_balance = balance;
        let interest = round2(opening_balance * rate);
        // The last period settles the remaining balance, absorbing rounding drift.
        // Earlier periods never repay more than is owed.
        let principal_portion = if period == periods {
            opening_balance
        } else {
            round2(payment - interest).min(opening_balance)
        };
        let interest_tax = round2(interest * VAT_RATE);
        let total_payment = principal_portion + interest + interest_tax;
        let closing_balance = round2(opening_balance - principal_portion);

        let row = PaymentRow {
            period,
            opening_balance,
            principal_portion,
            interest,
            interest_tax,
            total_payment,
            closing_balance,
        };
        trace!(?row, "period computed");

        totals.add(&row);
        payments.push(row);
        balance = closing_balance;
    }

    Ok(AmortizationResult {
        client,
        loan: loan.clone(),
        fixed_payment: round2(payment),
        payments,
        totals,
    })
}
