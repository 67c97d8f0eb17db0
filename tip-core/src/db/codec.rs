//! Wire format for the persisted custom tip set.
//!
//! Every backend stores the same payload under the same logical key: a JSON
//! array of numbers, sorted ascending, defaults excluded — e.g. `[12.5,30.0]`.
//! Keeping the codec here, next to the repository trait, means the contract
//! cannot drift between backends.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::db::repository::RepositoryError;

/// The single logical key the custom set is stored under.
pub const CUSTOM_TIPS_KEY: &str = "custom_tip_percentages_v1";

/// Encodes the custom set as a JSON array of numbers, sorted ascending.
///
/// # Errors
///
/// Returns [`RepositoryError::Malformed`] if a value cannot be represented
/// as a JSON number (non-finite after conversion). Values a user can
/// actually enter — percentages with a few decimal places — always encode.
pub fn encode_custom_tips(customs: &[Decimal]) -> Result<String, RepositoryError> {
    let mut sorted = customs.to_vec();
    sorted.sort_unstable();

    let numbers = sorted
        .iter()
        .map(|value| {
            value
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .ok_or_else(|| {
                    RepositoryError::Malformed(format!("value {value} is not a JSON number"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    serde_json::to_string(&numbers).map_err(|e| RepositoryError::Malformed(e.to_string()))
}

/// Decodes a stored payload back into decimals.
///
/// Accepts exactly what [`encode_custom_tips`] produces: a JSON array of
/// numbers. Anything else — a non-array, an array with non-numeric entries,
/// or unparseable text — is [`RepositoryError::Malformed`], which callers
/// treat as "no stored data" plus a reported load error.
pub fn decode_custom_tips(raw: &str) -> Result<Vec<Decimal>, RepositoryError> {
    let numbers: Vec<serde_json::Number> =
        serde_json::from_str(raw).map_err(|e| RepositoryError::Malformed(e.to_string()))?;

    numbers
        .iter()
        .map(|number| {
            // A JSON number's shortest decimal rendering parses exactly.
            number
                .to_string()
                .parse::<Decimal>()
                .map_err(|e| RepositoryError::Malformed(format!("number {number}: {e}")))
        })
        .collect()
}
