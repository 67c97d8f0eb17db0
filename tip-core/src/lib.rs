pub mod calculations;
pub mod db;
pub mod models;
pub mod options;

pub use db::repository::{RepositoryError, TipRepository};
pub use models::*;
pub use options::{LoadedOptions, Removal, TipOptionSet, TipOptionsError};
