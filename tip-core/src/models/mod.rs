pub mod currency;
mod tip_option;

pub use currency::format_usd;
pub use tip_option::{TipOption, default_tip_percentages, is_default_tip};
