//! In-memory repository backend.
//!
//! Holds the raw wire payload in a mutex-guarded slot, so it exercises the
//! same codec path as a real backend. Used by tests and by ephemeral runs
//! where nothing should touch disk. Write failures can be injected to
//! exercise callers' no-partial-state guarantees.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::codec::{decode_custom_tips, encode_custom_tips};
use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{RepositoryError, TipRepository};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    value: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryRepository {
    /// Creates an empty store (fresh-install state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save_custom_tips` call fail with a
    /// `Database` error until turned off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Replaces the stored payload with arbitrary text, bypassing the
    /// codec. Lets tests stage malformed data.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.value.lock().unwrap() = Some(raw.into());
    }

    /// The raw stored payload, if any.
    pub fn raw(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl TipRepository for MemoryRepository {
    async fn load_custom_tips(&self) -> Result<Option<Vec<Decimal>>, RepositoryError> {
        match &*self.value.lock().unwrap() {
            Some(raw) => decode_custom_tips(raw).map(Some),
            None => Ok(None),
        }
    }

    async fn save_custom_tips(&self, customs: &[Decimal]) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(
                "injected write failure".to_string(),
            ));
        }
        let payload = encode_custom_tips(customs)?;
        *self.value.lock().unwrap() = Some(payload);
        Ok(())
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend. The connection string
/// is ignored; every `create` call returns a fresh, empty store.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn TipRepository>, RepositoryError> {
        Ok(Box::new(MemoryRepository::new()))
    }
}
