use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The baseline tip percentages, always offered and never removable.
pub fn default_tip_percentages() -> [Decimal; 5] {
    [10, 15, 18, 20, 25].map(Decimal::from)
}

/// Whether `value` is one of the baseline percentages.
pub fn is_default_tip(value: Decimal) -> bool {
    default_tip_percentages().contains(&value)
}

/// A selectable tip percentage with its display label.
///
/// Options are keyed by numeric value; two options never share a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipOption {
    /// The tip rate in percentage points.
    pub value: Decimal,
    /// Human-readable rendering, e.g. `"15%"` or `"12.5%"`.
    pub label: String,
}

impl TipOption {
    /// Builds an option for `value`, rendering the label with trailing
    /// zeros trimmed (`12.50` → `"12.5%"`, `15.0` → `"15%"`).
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            label: format!("{}%", value.normalize()),
        }
    }
}
