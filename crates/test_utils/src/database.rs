//! Database Test Utilities
//!
//! Starts throwaway PostgreSQL containers with the `infra_db` migrations
//! applied. Tests using them need Docker and are marked `#[ignore]`.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::sync::OnceCell;

use infra_db::PgUnitOfWorkFactory;

const IMAGE: (&str, &str) = ("postgres", "16-alpine");
const USER: &str = "genealogist";
const PASSWORD: &str = "genealogist";
const DATABASE: &str = "family_tree_test";
const READY_LINE: &str = "database system is ready to accept connections";

/// Tables created by the migrations
pub const TABLES: [&str; 3] = ["notes", "multimedia_links", "families"];

pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// A migrated PostgreSQL database living as long as its container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    url: String,
    pool: PgPool,
}

impl TestDatabase {
    /// Starts a container and applies the migrations
    pub async fn start() -> Result<Self, SetupError> {
        let (name, tag) = IMAGE;
        let container = GenericImage::new(name, tag)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_LINE))
            .with_env_var("POSTGRES_USER", USER)
            .with_env_var("POSTGRES_PASSWORD", PASSWORD)
            .with_env_var("POSTGRES_DB", DATABASE)
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let url = format!("postgres://{USER}:{PASSWORD}@{host}:{port}/{DATABASE}");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;
        infra_db::run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// A unit of work factory over this database
    pub fn factory(&self) -> PgUnitOfWorkFactory {
        PgUnitOfWorkFactory::new(self.pool.clone())
    }

    /// Empties every table and restarts the id sequences
    pub async fn reset(&self) -> Result<(), SetupError> {
        sqlx::query(&format!("TRUNCATE TABLE {} RESTART IDENTITY", TABLES.join(", ")))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

static SHARED: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// One container shared by every test of the binary
///
/// Tests sharing it must not depend on ids or row counts unless they call
/// [`TestDatabase::reset`] and run serially.
pub async fn shared_test_database() -> Result<Arc<TestDatabase>, SetupError> {
    SHARED
        .get_or_try_init(|| async { TestDatabase::start().await.map(Arc::new) })
        .await
        .cloned()
}

/// A container owned by a single test
pub async fn create_isolated_test_database() -> Result<TestDatabase, SetupError> {
    TestDatabase::start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_migrations() {
        let schema = include_str!("../../infra_db/migrations/20240101000001_family_tree.sql");
        for table in TABLES {
            assert!(
                schema.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table)),
                "migration does not create {}",
                table
            );
        }
    }
}
