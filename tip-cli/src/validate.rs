//! Validation of raw command-line input.
//!
//! The calculation worksheet only ever sees a typed [`BillSplitInput`];
//! everything the user typed passes through here first. Errors are
//! collected per field and all reported in one pass, so a form with three
//! bad fields produces three messages, not one.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use tip_core::calculations::BillSplitInput;

pub const MSG_NOT_A_NUMBER: &str = "Please enter a valid number.";
pub const MSG_BILL_NOT_POSITIVE: &str = "Bill amount must be greater than 0.";
pub const MSG_TIP_NEGATIVE: &str = "Tip percentage cannot be negative.";
pub const MSG_PEOPLE_NOT_WHOLE: &str = "Number of people must be a whole number.";
pub const MSG_PEOPLE_MIN: &str = "At least one person is required.";

/// Raw, unvalidated form values as the user typed them.
#[derive(Debug, Clone)]
pub struct RawBillForm {
    pub bill_amount: String,
    pub tip_percentage: String,
    pub number_of_people: String,
    pub round_share: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BillAmount,
    TipPercentage,
    NumberOfPeople,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BillAmount => "bill amount",
            Self::TipPercentage => "tip percentage",
            Self::NumberOfPeople => "number of people",
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .field.as_str(), .message)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// commas (thousands separator), then parses.
fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}

/// Parses a raw tip-percentage argument (`tips add` / `tips remove`), with
/// the same normalization as the form fields. `None` when the text is not a
/// number; range rules are the option set's concern.
pub fn parse_percentage(s: &str) -> Option<Decimal> {
    parse_decimal(s)
}

/// Parses a head count: a whole number ≥ 1. `"4"` and `"4.0"` are accepted,
/// `"4.5"` is not.
fn parse_people(s: &str) -> Result<u32, &'static str> {
    let Some(value) = parse_decimal(s) else {
        return Err(MSG_NOT_A_NUMBER);
    };
    if value.fract() != Decimal::ZERO {
        return Err(MSG_PEOPLE_NOT_WHOLE);
    }
    if value < Decimal::ONE {
        return Err(MSG_PEOPLE_MIN);
    }
    value.to_u32().ok_or(MSG_NOT_A_NUMBER)
}

/// Validates a raw form into a [`BillSplitInput`].
///
/// On failure, returns every field error found; state is never partially
/// validated.
pub fn validate(form: &RawBillForm) -> Result<BillSplitInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let bill_amount = match parse_decimal(&form.bill_amount) {
        None => {
            errors.push(FieldError {
                field: Field::BillAmount,
                message: MSG_NOT_A_NUMBER,
            });
            None
        }
        Some(value) if value <= Decimal::ZERO => {
            errors.push(FieldError {
                field: Field::BillAmount,
                message: MSG_BILL_NOT_POSITIVE,
            });
            None
        }
        Some(value) => Some(value),
    };

    let tip_percentage = match parse_decimal(&form.tip_percentage) {
        None => {
            errors.push(FieldError {
                field: Field::TipPercentage,
                message: MSG_NOT_A_NUMBER,
            });
            None
        }
        Some(value) if value < Decimal::ZERO => {
            errors.push(FieldError {
                field: Field::TipPercentage,
                message: MSG_TIP_NEGATIVE,
            });
            None
        }
        Some(value) => Some(value),
    };

    let number_of_people = match parse_people(&form.number_of_people) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError {
                field: Field::NumberOfPeople,
                message,
            });
            None
        }
    };

    match (bill_amount, tip_percentage, number_of_people) {
        (Some(bill_amount), Some(tip_percentage), Some(number_of_people)) if errors.is_empty() => {
            Ok(BillSplitInput {
                bill_amount,
                tip_percentage,
                number_of_people,
                round_share: form.round_share,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn form(
        bill: &str,
        tip: &str,
        people: &str,
    ) -> RawBillForm {
        RawBillForm {
            bill_amount: bill.to_string(),
            tip_percentage: tip.to_string(),
            number_of_people: people.to_string(),
            round_share: false,
        }
    }

    // =========================================================================
    // happy path
    // =========================================================================

    #[test]
    fn valid_form_produces_typed_input() {
        let input = validate(&form("100.00", "15", "3")).unwrap();

        assert_eq!(input.bill_amount, dec!(100.00));
        assert_eq!(input.tip_percentage, dec!(15));
        assert_eq!(input.number_of_people, 3);
        assert!(!input.round_share);
    }

    #[test]
    fn accepts_comma_grouped_bill_amount() {
        let input = validate(&form("1,234.56", "15", "2")).unwrap();

        assert_eq!(input.bill_amount, dec!(1234.56));
    }

    #[test]
    fn accepts_fractional_tip_and_whole_valued_people() {
        let input = validate(&form("50", "12.5", "4.0")).unwrap();

        assert_eq!(input.tip_percentage, dec!(12.5));
        assert_eq!(input.number_of_people, 4);
    }

    #[test]
    fn tip_above_one_hundred_is_valid_for_calculation() {
        let input = validate(&form("50", "150", "1")).unwrap();

        assert_eq!(input.tip_percentage, dec!(150));
    }

    // =========================================================================
    // field errors
    // =========================================================================

    #[test]
    fn rejects_non_numeric_bill() {
        let errors = validate(&form("lots", "15", "2")).unwrap_err();

        assert_eq!(
            errors,
            vec![FieldError {
                field: Field::BillAmount,
                message: MSG_NOT_A_NUMBER,
            }]
        );
    }

    #[test]
    fn rejects_zero_bill() {
        let errors = validate(&form("0", "15", "2")).unwrap_err();

        assert_eq!(errors[0].message, MSG_BILL_NOT_POSITIVE);
    }

    #[test]
    fn rejects_negative_tip() {
        let errors = validate(&form("50", "-5", "2")).unwrap_err();

        assert_eq!(errors[0].message, MSG_TIP_NEGATIVE);
    }

    #[test]
    fn rejects_fractional_people() {
        let errors = validate(&form("50", "15", "2.5")).unwrap_err();

        assert_eq!(errors[0].message, MSG_PEOPLE_NOT_WHOLE);
    }

    #[test]
    fn rejects_zero_people() {
        let errors = validate(&form("50", "15", "0")).unwrap_err();

        assert_eq!(errors[0].message, MSG_PEOPLE_MIN);
    }

    #[test]
    fn rejects_negative_people() {
        let errors = validate(&form("50", "15", "-2")).unwrap_err();

        assert_eq!(errors[0].message, MSG_PEOPLE_MIN);
    }

    #[test]
    fn reports_every_invalid_field_at_once() {
        let errors = validate(&form("", "-1", "0")).unwrap_err();

        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::BillAmount, Field::TipPercentage, Field::NumberOfPeople]
        );
    }

    // =========================================================================
    // percentage arguments
    // =========================================================================

    #[test]
    fn parse_percentage_accepts_fractions() {
        assert_eq!(parse_percentage("12.5"), Some(dec!(12.5)));
        assert_eq!(parse_percentage(" 30 "), Some(dec!(30)));
    }

    #[test]
    fn parse_percentage_rejects_text() {
        assert_eq!(parse_percentage("a lot"), None);
        assert_eq!(parse_percentage(""), None);
    }

    #[test]
    fn field_error_display_names_the_field() {
        let error = FieldError {
            field: Field::NumberOfPeople,
            message: MSG_PEOPLE_MIN,
        };

        assert_eq!(error.to_string(), "number of people: At least one person is required.");
    }
}
