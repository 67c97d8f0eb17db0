use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The stored payload exists but is not a JSON array of numbers.
    #[error("Stored custom tips are malformed: {0}")]
    Malformed(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage collaborator for the user's custom tip percentages.
///
/// The store holds a single logical value: the full custom set. Every write
/// replaces it outright; there is no append or patch operation, so a failed
/// write leaves the previous value intact.
#[async_trait]
pub trait TipRepository: std::fmt::Debug + Send + Sync {
    /// Reads the persisted custom set.
    ///
    /// `Ok(None)` means no value has ever been stored (fresh install) — not
    /// an error. A payload that exists but cannot be decoded is
    /// [`RepositoryError::Malformed`].
    async fn load_custom_tips(&self) -> Result<Option<Vec<Decimal>>, RepositoryError>;

    /// Replaces the persisted custom set in full.
    ///
    /// The write is atomic: it either fully succeeds or leaves the prior
    /// value untouched.
    async fn save_custom_tips(&self, customs: &[Decimal]) -> Result<(), RepositoryError>;
}
