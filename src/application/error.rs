use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::UserId;

/// Code reported when an operation needs a loan the user does not hold.
pub const LOAN_NOT_FOUND: u16 = 200;

/// Code reported when issuing to a user who already holds a loan.
pub const LOAN_ALREADY_EXISTS: u16 = 201;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("No loan exists for user: {0}")]
    LoanNotFound(UserId),

    #[error("Loan already exists for user: {0}")]
    LoanAlreadyExists(UserId),
}

impl LedgerError {
    /// Numeric code callers match on.
    pub fn code(&self) -> u16 {
        match self {
            LedgerError::LoanNotFound(_) => LOAN_NOT_FOUND,
            LedgerError::LoanAlreadyExists(_) => LOAN_ALREADY_EXISTS,
        }
    }
}

/// Wire rendering of an operation result.
///
/// Serializes as `{"ok": <value>}` or `{"err": <code>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome<T> {
    Ok(T),
    Err(u16),
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Err(code) => Outcome::Err(code),
        }
    }
}

impl<T> From<Result<T, LedgerError>> for Outcome<T> {
    fn from(result: Result<T, LedgerError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(e) => Outcome::Err(e.code()),
        }
    }
}
