use async_trait::async_trait;

use tip_core::db::factory::{DbConfig, RepositoryFactory};
use tip_core::db::repository::{RepositoryError, TipRepository};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`tip_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use tip_core::db::RepositoryRegistry;
/// use tip_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted connection-string values are whatever sqlx's SQLite driver
    /// accepts: a bare file path (`tipsplit.db`), a URL
    /// (`sqlite:tipsplit.db?mode=rwc`), or `:memory:` for an ephemeral
    /// database.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn TipRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}
