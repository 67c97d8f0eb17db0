//! Bill-split worksheet: tip amount, total bill, and per-person share.
//!
//! The worksheet is a pure function of its input. Given a validated bill
//! amount, tip percentage, head count, and a rounding flag, it produces the
//! three values the calculator displays:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Tip amount = bill amount × tip percentage / 100 |
//! | 2    | Total bill = bill amount + tip amount |
//! | 3    | Raw share = total bill / number of people |
//! | 4    | Per-person amount = raw share, optionally rounded to the nearest whole currency unit |
//!
//! When rounding is requested, midpoints round away from zero (`38.50` →
//! `39`). Each share is rounded independently, so the sum of rounded shares
//! may not equal the total bill; that discrepancy is accepted behavior, not
//! an error.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tip_core::calculations::{BillSplitInput, BillSplitWorksheet};
//!
//! let input = BillSplitInput {
//!     bill_amount: dec!(100.00),
//!     tip_percentage: dec!(20),
//!     number_of_people: 4,
//!     round_share: false,
//! };
//!
//! let result = BillSplitWorksheet::new().calculate(&input).unwrap();
//!
//! assert_eq!(result.tip_amount, dec!(20.00));
//! assert_eq!(result.total_bill, dec!(120.00));
//! assert_eq!(result.per_person_amount, dec!(30.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_to_unit;

/// Errors that can occur during bill-split calculations.
///
/// Callers are expected to validate user input before building a
/// [`BillSplitInput`]; the worksheet re-checks anyway so it stays safe to
/// reuse outside that flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillSplitError {
    /// The bill amount was zero or negative.
    #[error("bill amount must be greater than zero, got {0}")]
    NonPositiveBillAmount(Decimal),

    /// The tip percentage was negative.
    #[error("tip percentage cannot be negative, got {0}")]
    NegativeTipPercentage(Decimal),

    /// The bill was split between zero people.
    #[error("number of people must be at least 1")]
    NoPeople,
}

/// Input values for the bill-split worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSplitInput {
    /// Total bill amount before tip. Must be greater than zero.
    pub bill_amount: Decimal,

    /// Tip rate in percentage points (e.g. `15`, `12.5`). Must not be
    /// negative; values above 100 are legal here (the [0, 100] rule applies
    /// only to saved tip options).
    pub tip_percentage: Decimal,

    /// How many people share the bill. Must be at least 1.
    pub number_of_people: u32,

    /// When true, each person's share is rounded to the nearest whole
    /// currency unit, midpoints away from zero.
    pub round_share: bool,
}

/// Result of the bill-split worksheet.
///
/// All amounts are raw decimals; display formatting is a separate concern
/// (see [`crate::models::currency::format_usd`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSplitResult {
    /// The gratuity: bill amount × tip percentage / 100.
    pub tip_amount: Decimal,

    /// Bill amount plus tip.
    pub total_bill: Decimal,

    /// Each person's share of the total bill.
    pub per_person_amount: Decimal,

    /// Whether `per_person_amount` was rounded to a whole unit.
    pub share_rounded: bool,
}

/// Calculator for the bill-split worksheet.
#[derive(Debug, Clone, Default)]
pub struct BillSplitWorksheet;

impl BillSplitWorksheet {
    /// Creates a new bill-split worksheet calculator.
    pub fn new() -> Self {
        Self
    }

    /// Calculates the complete bill-split worksheet.
    ///
    /// Pure and deterministic: the same input always produces the same
    /// result, with no side effects, retries, or partial failure.
    ///
    /// # Errors
    ///
    /// Returns [`BillSplitError`] if:
    /// - The bill amount is zero or negative
    /// - The tip percentage is negative
    /// - The number of people is zero
    pub fn calculate(
        &self,
        input: &BillSplitInput,
    ) -> Result<BillSplitResult, BillSplitError> {
        if input.bill_amount <= Decimal::ZERO {
            return Err(BillSplitError::NonPositiveBillAmount(input.bill_amount));
        }
        if input.tip_percentage < Decimal::ZERO {
            return Err(BillSplitError::NegativeTipPercentage(input.tip_percentage));
        }
        if input.number_of_people < 1 {
            return Err(BillSplitError::NoPeople);
        }

        let tip_amount = self.tip_amount(input.bill_amount, input.tip_percentage);
        let total_bill = self.total_bill(input.bill_amount, tip_amount);
        let per_person_amount =
            self.per_person_share(total_bill, input.number_of_people, input.round_share);

        Ok(BillSplitResult {
            tip_amount,
            total_bill,
            per_person_amount,
            share_rounded: input.round_share,
        })
    }

    /// Calculates the tip amount.
    fn tip_amount(
        &self,
        bill_amount: Decimal,
        tip_percentage: Decimal,
    ) -> Decimal {
        bill_amount * tip_percentage / Decimal::ONE_HUNDRED
    }

    /// Calculates the total bill including tip.
    fn total_bill(
        &self,
        bill_amount: Decimal,
        tip_amount: Decimal,
    ) -> Decimal {
        bill_amount + tip_amount
    }

    /// Calculates one person's share, optionally rounded to a whole unit.
    fn per_person_share(
        &self,
        total_bill: Decimal,
        number_of_people: u32,
        round_share: bool,
    ) -> Decimal {
        let raw = total_bill / Decimal::from(number_of_people);
        if round_share { round_to_unit(raw) } else { raw }
    }
}
