//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the family tree
//! services, using SQLx.
//!
//! # Architecture
//!
//! The crate implements the data access ports of `core_kernel`:
//!
//! - [`PgUnitOfWorkFactory`] opens one [`PgUnitOfWork`] per use case
//! - each unit of work hands out a note, multimedia link and family repository
//! - the repositories share a [`PgSession`], so a commit covers every write
//!   made through any of them
//!
//! Reads are served from the pool and only see committed rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PgUnitOfWorkFactory};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/family_tree")).await?;
//! run_migrations(&pool).await?;
//! let factory = PgUnitOfWorkFactory::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod session;
pub mod unit_of_work;
pub mod repositories;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use session::PgSession;
pub use unit_of_work::{PgUnitOfWork, PgUnitOfWorkFactory};
pub use repositories::{FamilyRepository, MultimediaLinkRepository, NoteRepository};
