//! `credit_simulator` computes fixed-payment amortization tables for consumer credits.
//!
//! Given a principal, an annual interest rate and a number of monthly periods, it
//! derives the constant monthly payment of the annuity (French) system and breaks
//! every period down into:
//! - **Principal**: the part of the payment that reduces the balance.
//! - **Interest**: the monthly rate applied to the opening balance.
//! - **VAT on interest**: a fixed 16% tax charged on the interest.
//!
//! Every amount is rounded to cents as soon as it is computed, and the last period
//! settles the remaining balance so the table always closes at zero.
//!
//! ## Usage
//!
//! ```rust
//! use credit_simulator::{compute_schedule, ClientInfo, CreditType, LoanRequest};
//! use rust_decimal_macros::dec;
//!
//! let request = LoanRequest::new(
//!     Some(dec!(10_000)),
//!     Some(CreditType::Mortgage.annual_rate()),
//!     Some(dec!(12)),
//! );
//! let client = ClientInfo::new("Juan", "Pérez", "juan@example.com");
//!
//! match compute_schedule(&request, client) {
//!     Ok(table) => {
//!         println!("Fixed payment: {:.2}", table.fixed_payment);
//!         println!("Total paid:    {:.2}", table.totals.total_payments);
//!         assert_eq!(table.payments.len(), 12);
//!     }
//!     Err(e) => {
//!         eprintln!("Error calculating the amortization table: {}", e);
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod loan;
pub mod report;
pub mod schedule;

pub use client::{ClientError, ClientInfo};
pub use error::{InputField, ScheduleError};
pub use loan::{CreditType, LoanParameters, LoanRequest};
pub use schedule::{
    AmortizationResult, PaymentRow, Totals, VAT_RATE, amortize, compute_schedule,
};
