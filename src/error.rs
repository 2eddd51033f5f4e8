//! Errors reported by the amortization engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies which numeric loan input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Principal,
    AnnualRate,
    Periods,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Principal => "principal",
            InputField::AnnualRate => "annual interest rate",
            InputField::Periods => "number of periods",
        };
        f.write_str(name)
    }
}

/// Error returned by the amortization engine.
///
/// There is a single kind: the three numeric inputs must all be present and
/// within range before a table can be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("not enough data to compute the amortization table: {field} {problem}")]
    IncompleteInput {
        field: InputField,
        problem: &'static str,
    },
}

impl ScheduleError {
    pub(crate) fn incomplete(field: InputField, problem: &'static str) -> Self {
        ScheduleError::IncompleteInput { field, problem }
    }

    /// The input that caused the rejection.
    pub fn field(&self) -> InputField {
        match self {
            ScheduleError::IncompleteInput { field, .. } => *field,
        }
    }
}
