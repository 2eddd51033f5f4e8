//! Loan inputs, their validation and the credit-type rate tiers.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{InputField, ScheduleError};

/// Loan inputs as received from a caller, before validation.
///
/// Every field may be missing; [`LoanParameters::try_from`] decides whether
/// the request is complete enough to amortize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// The credit amount.
    #[serde(default)]
    pub principal: Option<Decimal>,
    /// The annual interest rate as a fraction (0.11 for 11%).
    #[serde(default)]
    pub annual_rate: Option<Decimal>,
    /// The number of monthly payments. Kept as a decimal so that fractional
    /// values can be rejected instead of truncated.
    #[serde(default)]
    pub periods: Option<Decimal>,
}

impl LoanRequest {
    pub fn new(
        principal: Option<Decimal>,
        annual_rate: Option<Decimal>,
        periods: Option<Decimal>,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            periods,
        }
    }

    /// Builds a request from floating point inputs. `NaN` and infinities have
    /// no decimal representation and are treated as missing.
    pub fn from_floats(
        principal: Option<f64>,
        annual_rate: Option<f64>,
        periods: Option<f64>,
    ) -> Self {
        Self {
            principal: principal.and_then(Decimal::from_f64),
            annual_rate: annual_rate.and_then(Decimal::from_f64),
            periods: periods.and_then(Decimal::from_f64),
        }
    }
}

/// Longest accepted term, in months (100 years).
pub const MAX_PERIODS: u32 = 1200;

/// Validated loan inputs.
///
/// Fields are private: the only ways to obtain a value are [`LoanParameters::new`],
/// conversion from a [`LoanRequest`] and deserialization, which all run the
/// same range checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LoanRequest")]
pub struct LoanParameters {
    principal: Decimal,
    annual_rate: Decimal,
    periods: u32,
}

impl LoanParameters {
    /// Validates and builds the loan parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::IncompleteInput`] if the principal is negative,
    /// the rate is not strictly positive or the number of periods is zero or
    /// above [`MAX_PERIODS`].
    pub fn new(
        principal: Decimal,
        annual_rate: Decimal,
        periods: u32,
    ) -> Result<Self, ScheduleError> {
        if principal < Decimal::ZERO {
            return Err(ScheduleError::incomplete(
                InputField::Principal,
                "must be zero or greater",
            ));
        }
        if annual_rate <= Decimal::ZERO {
            return Err(ScheduleError::incomplete(
                InputField::AnnualRate,
                "must be greater than zero",
            ));
        }
        if periods == 0 {
            return Err(ScheduleError::incomplete(
                InputField::Periods,
                "must be greater than zero",
            ));
        }
        if periods > MAX_PERIODS {
            return Err(ScheduleError::incomplete(
                InputField::Periods,
                "exceeds the longest accepted term",
            ));
        }

        Ok(Self {
            principal,
            annual_rate,
            periods,
        })
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn periods(&self) -> u32 {
        self.periods
    }
}

impl TryFrom<&LoanRequest> for LoanParameters {
    type Error = ScheduleError;

    fn try_from(request: &LoanRequest) -> Result<Self, Self::Error> {
        let principal = request
            .principal
            .ok_or(ScheduleError::incomplete(InputField::Principal, "is missing"))?;
        let annual_rate = request
            .annual_rate
            .ok_or(ScheduleError::incomplete(InputField::AnnualRate, "is missing"))?;
        let periods = request
            .periods
            .ok_or(ScheduleError::incomplete(InputField::Periods, "is missing"))?;

        if !periods.fract().is_zero() {
            return Err(ScheduleError::incomplete(
                InputField::Periods,
                "must be a whole number",
            ));
        }
        // Negative counts fall through to `new`, which reports them as zero-or-less.
        let periods = if periods.is_sign_negative() {
            0
        } else {
            periods.to_u32().ok_or(ScheduleError::incomplete(
                InputField::Periods,
                "is too large",
            ))?
        };

        Self::new(principal, annual_rate, periods)
    }
}

impl TryFrom<LoanRequest> for LoanParameters {
    type Error = ScheduleError;

    fn try_from(request: LoanRequest) -> Result<Self, Self::Error> {
        Self::try_from(&request)
    }
}

/// Kind of credit offered, each with its own fixed annual rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditType {
    Mortgage,
    CarBuying,
    Consumption,
    #[default]
    Other,
}

impl CreditType {
    pub const ALL: [CreditType; 4] = [
        CreditType::Mortgage,
        CreditType::CarBuying,
        CreditType::Consumption,
        CreditType::Other,
    ];

    /// Annual interest rate charged for this kind of credit.
    pub fn annual_rate(self) -> Decimal {
        match self {
            CreditType::Mortgage => dec!(0.11),
            CreditType::CarBuying => dec!(0.14),
            CreditType::Consumption => dec!(0.25),
            CreditType::Other => dec!(0.35),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            CreditType::Mortgage => "mortgage",
            CreditType::CarBuying => "car-buying",
            CreditType::Consumption => "consumption",
            CreditType::Other => "other",
        }
    }

    /// Lenient lookup: anything unrecognised is charged the `Other` rate.
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CreditType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CreditType::ALL
            .into_iter()
            .find(|kind| kind.id() == needle)
            .ok_or_else(|| {
                format!(
                    "unknown credit type '{s}' (expected one of: mortgage, car-buying, consumption, other)"
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_accepts_zero_principal() {
        let params = LoanParameters::new(dec!(0), dec!(0.25), 6).unwrap();
        assert_eq!(params.principal(), dec!(0));
        assert_eq!(params.periods(), 6);
    }

    #[rstest]
    #[case(dec!(-1), dec!(0.11), 12, InputField::Principal)]
    #[case(dec!(1000), dec!(0), 12, InputField::AnnualRate)]
    #[case(dec!(1000), dec!(-0.11), 12, InputField::AnnualRate)]
    #[case(dec!(1000), dec!(0.11), 0, InputField::Periods)]
    #[case(dec!(1000), dec!(0.11), MAX_PERIODS + 1, InputField::Periods)]
    #[case(dec!(1000), dec!(0.000000012), 4_000_000_000, InputField::Periods)]
    fn test_new_rejects_out_of_range(
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] periods: u32,
        #[case] field: InputField,
    ) {
        let err = LoanParameters::new(principal, rate, periods).unwrap_err();
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case(LoanRequest::new(None, Some(dec!(0.11)), Some(dec!(12))), InputField::Principal)]
    #[case(LoanRequest::new(Some(dec!(1000)), None, Some(dec!(12))), InputField::AnnualRate)]
    #[case(LoanRequest::new(Some(dec!(1000)), Some(dec!(0.11)), None), InputField::Periods)]
    #[case(LoanRequest::new(Some(dec!(1000)), Some(dec!(0.11)), Some(dec!(12.5))), InputField::Periods)]
    #[case(LoanRequest::new(Some(dec!(1000)), Some(dec!(0.11)), Some(dec!(-3))), InputField::Periods)]
    #[case(LoanRequest::new(Some(dec!(1000)), Some(dec!(0.11)), Some(dec!(5000000000))), InputField::Periods)]
    fn test_request_rejections(#[case] request: LoanRequest, #[case] field: InputField) {
        let err = LoanParameters::try_from(&request).unwrap_err();
        assert_eq!(err.field(), field);
    }

    #[test]
    fn test_longest_term_is_accepted() {
        let params = LoanParameters::new(dec!(1000), dec!(0.11), MAX_PERIODS).unwrap();
        assert_eq!(params.periods(), 1200);
    }

    #[test]
    fn test_request_with_whole_decimal_periods() {
        let request = LoanRequest::new(Some(dec!(1000)), Some(dec!(0.11)), Some(dec!(12.00)));
        let params = LoanParameters::try_from(&request).unwrap();
        assert_eq!(params.periods(), 12);
    }

    #[test]
    fn test_non_finite_floats_are_missing() {
        let request = LoanRequest::from_floats(Some(f64::NAN), Some(0.11), Some(12.0));
        assert_eq!(request.principal, None);

        let err = LoanParameters::try_from(&request).unwrap_err();
        assert_eq!(err.field(), InputField::Principal);

        let request = LoanRequest::from_floats(Some(1000.0), Some(f64::INFINITY), Some(12.0));
        assert_eq!(
            LoanParameters::try_from(&request).unwrap_err().field(),
            InputField::AnnualRate
        );
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let params: LoanParameters =
            serde_json::from_str(r#"{"principal": "10000", "annual_rate": "0.11", "periods": 12}"#)
                .unwrap();
        assert_eq!(params.annual_rate(), dec!(0.11));

        let invalid = serde_json::from_str::<LoanParameters>(r#"{"principal": "10000", "periods": 12}"#);
        assert!(invalid.is_err());
    }

    #[rstest]
    #[case("mortgage", CreditType::Mortgage, dec!(0.11))]
    #[case("car-buying", CreditType::CarBuying, dec!(0.14))]
    #[case("consumption", CreditType::Consumption, dec!(0.25))]
    #[case("other", CreditType::Other, dec!(0.35))]
    #[case("payday", CreditType::Other, dec!(0.35))]
    fn test_credit_type_rates(#[case] id: &str, #[case] kind: CreditType, #[case] rate: Decimal) {
        assert_eq!(CreditType::from_id(id), kind);
        assert_eq!(kind.annual_rate(), rate);
    }

    #[test]
    fn test_credit_type_parse_is_strict() {
        assert_eq!("Mortgage".parse::<CreditType>(), Ok(CreditType::Mortgage));
        assert!("payday".parse::<CreditType>().is_err());
    }
}
