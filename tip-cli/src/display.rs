//! User-facing output: calculation results, option listings, and outcome
//! messages. Everything printed for the user goes through here; tracing is
//! reserved for diagnostics.

use tip_core::calculations::BillSplitResult;
use tip_core::models::format_usd;
use tip_core::{TipOptionSet, is_default_tip};

/// Renders the three result lines of a calculation.
pub fn print_results(result: &BillSplitResult) {
    println!("Tip Amount         {}", format_usd(result.tip_amount));
    println!("Total Bill         {}", format_usd(result.total_bill));
    println!(
        "Amount Per Person  {}{}",
        format_usd(result.per_person_amount),
        if result.share_rounded {
            "  (rounded to the nearest dollar)"
        } else {
            ""
        }
    );
}

/// Lists the materialized tip options, marking user-added entries.
pub fn print_options(set: &TipOptionSet) {
    for option in set.options() {
        if is_default_tip(option.value) {
            println!("  {}", option.label);
        } else {
            println!("  {}  (custom)", option.label);
        }
    }
}
