//! PostgreSQL unit of work
//!
//! A [`PgUnitOfWork`] hands out one repository per entity type, all writing
//! through a shared [`PgSession`]. Committing it commits every staged insert,
//! update and delete in a single transaction.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgUnitOfWorkFactory};
//! use domain_tree::NoteService;
//!
//! let pool = create_pool(DatabaseConfig::new(url)).await?;
//! let factory = PgUnitOfWorkFactory::new(pool);
//! let notes = NoteService::new(Arc::new(factory.begin().await?));
//! ```

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{
    HealthCheckResult, HealthCheckable, PortError, Repository, RepositoryProvider, UnitOfWork,
    UnitOfWorkFactory,
};
use domain_tree::{Family, MultimediaLink, Note};

use crate::repositories::{FamilyRepository, MultimediaLinkRepository, NoteRepository};
use crate::session::PgSession;

const ADAPTER_ID: &str = "postgres-family-tree";

/// Unit of work backed by one PostgreSQL transaction
#[derive(Debug, Clone)]
pub struct PgUnitOfWork {
    session: Arc<PgSession>,
    notes: Arc<NoteRepository>,
    multimedia_links: Arc<MultimediaLinkRepository>,
    families: Arc<FamilyRepository>,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        let session = Arc::new(PgSession::new(pool));
        Self {
            notes: Arc::new(NoteRepository::new(Arc::clone(&session))),
            multimedia_links: Arc::new(MultimediaLinkRepository::new(Arc::clone(&session))),
            families: Arc::new(FamilyRepository::new(Arc::clone(&session))),
            session,
        }
    }

    pub fn session(&self) -> &PgSession {
        &self.session
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    #[instrument(skip(self))]
    async fn commit(&self) -> Result<(), PortError> {
        Ok(self.session.commit().await?)
    }

    #[instrument(skip(self))]
    async fn rollback(&self) -> Result<(), PortError> {
        Ok(self.session.rollback().await?)
    }
}

impl RepositoryProvider<Note> for PgUnitOfWork {
    fn repository(&self) -> Arc<dyn Repository<Note>> {
        self.notes.clone()
    }
}

impl RepositoryProvider<MultimediaLink> for PgUnitOfWork {
    fn repository(&self) -> Arc<dyn Repository<MultimediaLink>> {
        self.multimedia_links.clone()
    }
}

impl RepositoryProvider<Family> for PgUnitOfWork {
    fn repository(&self) -> Arc<dyn Repository<Family>> {
        self.families.clone()
    }
}

/// Opens a [`PgUnitOfWork`] per use case over a shared pool
#[derive(Debug, Clone)]
pub struct PgUnitOfWorkFactory {
    pool: PgPool,
}

impl PgUnitOfWorkFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UnitOfWorkFactory for PgUnitOfWorkFactory {
    type UnitOfWork = PgUnitOfWork;

    async fn begin(&self) -> Result<PgUnitOfWork, PortError> {
        Ok(PgUnitOfWork::new(self.pool.clone()))
    }
}

#[async_trait]
impl HealthCheckable for PgUnitOfWorkFactory {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => {
                HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e))
            }
        }
    }
}
