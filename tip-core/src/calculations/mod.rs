//! Bill-splitting calculation logic.
//!
//! This module provides the computation side of the calculator: shared
//! currency rounding helpers and the bill-split worksheet itself.

pub mod bill_split;
pub mod common;

pub use bill_split::{BillSplitError, BillSplitInput, BillSplitResult, BillSplitWorksheet};
