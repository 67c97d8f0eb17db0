//! The set of selectable tip percentages.
//!
//! A fixed default set ({10, 15, 18, 20, 25}) is merged with the user's
//! persisted custom percentages into a materialized view that is always
//! deduplicated and sorted ascending by numeric value. Additions and
//! removals re-persist the custom set (defaults are never stored) through a
//! [`TipRepository`].
//!
//! Mutations are save-then-commit: the updated custom list is persisted
//! first and only adopted in memory once the write succeeds, so a failed
//! write leaves no partial state to roll back.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tip_core::db::MemoryRepository;
//! use tip_core::options::TipOptionSet;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let repo = MemoryRepository::new();
//! let loaded = TipOptionSet::initialize(&repo).await;
//! assert!(loaded.load_error.is_none());
//!
//! let mut set = loaded.set;
//! set.add(&repo, dec!(12.5)).await.unwrap();
//!
//! let labels: Vec<_> = set.options().iter().map(|o| o.label.as_str()).collect();
//! assert_eq!(labels, ["10%", "12.5%", "15%", "18%", "20%", "25%"]);
//! # });
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::db::repository::{RepositoryError, TipRepository};
use crate::models::{TipOption, default_tip_percentages, is_default_tip};

/// Errors that can occur when mutating the tip option set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TipOptionsError {
    /// A custom percentage must lie in [0, 100].
    #[error("tip percentage {0} is outside the valid range 0 to 100")]
    OutOfRange(Decimal),

    /// The candidate's numeric value is already offered.
    #[error("{0}% is already in the list")]
    Duplicate(Decimal),

    /// Default percentages are permanent.
    #[error("{0}% is a default tip percentage and cannot be removed")]
    NotRemovable(Decimal),

    /// The store rejected the write; in-memory state is unchanged.
    #[error("could not persist custom tips: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Outcome of [`TipOptionSet::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The value was a custom entry and has been removed and un-persisted.
    Removed,
    /// The value was not in the set; nothing changed.
    NotPresent,
}

/// Result of [`TipOptionSet::initialize`].
///
/// Loading never fails outright: on a read error or malformed stored data
/// the set falls back to defaults only and the error is carried here for
/// the caller to surface as a non-fatal notice.
#[derive(Debug)]
pub struct LoadedOptions {
    pub set: TipOptionSet,
    pub load_error: Option<RepositoryError>,
}

/// The materialized, deduplicated, ascending set of selectable tip
/// percentages: fixed defaults plus persisted customs.
#[derive(Debug, Clone, PartialEq)]
pub struct TipOptionSet {
    /// Custom percentages only (what gets persisted), sorted ascending,
    /// never overlapping the defaults.
    customs: Vec<Decimal>,
    /// Materialized view: defaults ∪ customs, deduplicated, ascending.
    options: Vec<TipOption>,
}

impl Default for TipOptionSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TipOptionSet {
    /// A set containing only the default percentages.
    pub fn with_defaults() -> Self {
        Self::from_customs(Vec::new())
    }

    /// Builds a set from previously persisted custom values.
    ///
    /// Stored values equal to a default are not kept as customs (overlaps
    /// are never separately stored); duplicates within the stored list
    /// collapse.
    pub fn from_customs(customs: Vec<Decimal>) -> Self {
        let mut customs: Vec<Decimal> = customs
            .into_iter()
            .filter(|value| !is_default_tip(*value))
            .collect();
        customs.sort_unstable();
        customs.dedup();

        let mut set = Self {
            customs,
            options: Vec::new(),
        };
        set.materialize();
        set
    }

    /// Loads the persisted custom set and merges it with the defaults.
    ///
    /// Never fails: a read error or malformed payload falls back to the
    /// defaults-only set, with the error reported in
    /// [`LoadedOptions::load_error`].
    pub async fn initialize(repo: &dyn TipRepository) -> LoadedOptions {
        match repo.load_custom_tips().await {
            Ok(Some(customs)) => LoadedOptions {
                set: Self::from_customs(customs),
                load_error: None,
            },
            Ok(None) => LoadedOptions {
                set: Self::with_defaults(),
                load_error: None,
            },
            Err(err) => {
                warn!("falling back to default tip options: {err}");
                LoadedOptions {
                    set: Self::with_defaults(),
                    load_error: Some(err),
                }
            }
        }
    }

    /// The materialized options, ascending by numeric value.
    pub fn options(&self) -> &[TipOption] {
        &self.options
    }

    /// The custom percentages only (what persistence holds), ascending.
    pub fn customs(&self) -> &[Decimal] {
        &self.customs
    }

    /// Whether `value` is currently offered (default or custom).
    pub fn contains(&self, value: Decimal) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    /// Adds a custom percentage and persists the updated custom set.
    ///
    /// # Errors
    ///
    /// * [`TipOptionsError::OutOfRange`] — `candidate` outside [0, 100].
    /// * [`TipOptionsError::Duplicate`] — the value is already offered.
    /// * [`TipOptionsError::Persistence`] — the store rejected the write;
    ///   the in-memory set is unchanged.
    pub async fn add(
        &mut self,
        repo: &dyn TipRepository,
        candidate: Decimal,
    ) -> Result<(), TipOptionsError> {
        if candidate < Decimal::ZERO || candidate > Decimal::ONE_HUNDRED {
            return Err(TipOptionsError::OutOfRange(candidate));
        }
        if self.contains(candidate) {
            return Err(TipOptionsError::Duplicate(candidate));
        }

        let mut updated = self.customs.clone();
        updated.push(candidate);
        updated.sort_unstable();

        repo.save_custom_tips(&updated).await?;

        self.customs = updated;
        self.materialize();
        Ok(())
    }

    /// Removes a custom percentage and persists the updated custom set.
    ///
    /// Removing a value that is not present is a successful no-op
    /// ([`Removal::NotPresent`]). This component does not own any "currently
    /// selected" state; callers that were pointing at the removed value are
    /// responsible for resetting their selection.
    ///
    /// # Errors
    ///
    /// * [`TipOptionsError::NotRemovable`] — `value` is a default.
    /// * [`TipOptionsError::Persistence`] — the store rejected the write;
    ///   the in-memory set is unchanged.
    pub async fn remove(
        &mut self,
        repo: &dyn TipRepository,
        value: Decimal,
    ) -> Result<Removal, TipOptionsError> {
        if is_default_tip(value) {
            return Err(TipOptionsError::NotRemovable(value));
        }
        if !self.customs.contains(&value) {
            return Ok(Removal::NotPresent);
        }

        let updated: Vec<Decimal> = self
            .customs
            .iter()
            .copied()
            .filter(|v| *v != value)
            .collect();

        repo.save_custom_tips(&updated).await?;

        self.customs = updated;
        self.materialize();
        Ok(Removal::Removed)
    }

    /// Rebuilds the materialized view: defaults ∪ customs, deduplicated by
    /// numeric value, sorted ascending.
    fn materialize(&mut self) {
        let mut values: Vec<Decimal> = default_tip_percentages()
            .into_iter()
            .chain(self.customs.iter().copied())
            .collect();
        values.sort_unstable();
        values.dedup();

        self.options = values.into_iter().map(TipOption::new).collect();
    }
}
