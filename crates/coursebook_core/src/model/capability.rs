//! Capability contracts that person variants opt into.
//!
//! # Responsibility
//! - Define `Payable` (monetary payment) and `Gradable` (grade average).
//! - Define the failure kinds returned when a computation has no valid result.
//!
//! # Invariants
//! - `compute_pay` never returns an amount `<= 0`.
//! - `compute_average` never returns a value for an empty grade history.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Contract for deriving a payment amount from stored attributes.
pub trait Payable {
    /// Computes the amount owed.
    ///
    /// # Errors
    /// - Returns `InvalidPaymentError` when the computed amount is `<= 0`.
    fn compute_pay(&self) -> Result<f64, InvalidPaymentError>;
}

/// Contract for deriving a numeric average from a grade history.
pub trait Gradable {
    /// Computes the arithmetic mean of all recorded grades.
    ///
    /// # Errors
    /// - Returns `InvalidAverageError` when no grades are recorded.
    fn compute_average(&self) -> Result<f64, InvalidAverageError>;
}

/// Payment computation produced a non-positive amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidPaymentError {
    /// Stored monthly salary is `<= 0`.
    NonPositiveSalary(f64),
    /// `hours * rate` is `<= 0`.
    NonPositiveTotal(f64),
}

impl InvalidPaymentError {
    /// The offending stored or computed amount.
    pub fn amount(&self) -> f64 {
        match self {
            Self::NonPositiveSalary(value) | Self::NonPositiveTotal(value) => *value,
        }
    }
}

impl Display for InvalidPaymentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveSalary(salary) => write!(
                f,
                "monthly salary must be greater than 0; current salary: {salary}"
            ),
            Self::NonPositiveTotal(total) => write!(
                f,
                "total pay must be greater than 0; computed pay: {total}"
            ),
        }
    }
}

impl Error for InvalidPaymentError {}

/// Average requested for a student with no recorded grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAverageError;

impl Display for InvalidAverageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no grades recorded")
    }
}

impl Error for InvalidAverageError {}

#[cfg(test)]
mod tests {
    use super::{InvalidAverageError, InvalidPaymentError};

    #[test]
    fn payment_error_exposes_offending_amount() {
        assert_eq!(InvalidPaymentError::NonPositiveSalary(-5.0).amount(), -5.0);
        assert_eq!(InvalidPaymentError::NonPositiveTotal(0.0).amount(), 0.0);
    }

    #[test]
    fn payment_error_message_names_the_amount() {
        let message = InvalidPaymentError::NonPositiveSalary(-250.5).to_string();
        assert!(message.contains("-250.5"), "unexpected message: {message}");

        let message = InvalidPaymentError::NonPositiveTotal(0.0).to_string();
        assert!(message.contains("computed pay: 0"), "unexpected message: {message}");
    }

    #[test]
    fn average_error_has_stable_message() {
        assert_eq!(InvalidAverageError.to_string(), "no grades recorded");
    }
}
