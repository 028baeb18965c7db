//! Adapters for the Family Tree Domain
//!
//! Implementations of the data access ports that live alongside the domain.
//! The PostgreSQL adapter lives in `infra_db`.
//!
//! # Available Adapters
//!
//! - **InMemoryUnitOfWork**: process-local store for tests, demos, and the
//!   `memory` storage mode of the API server
//!
//! ```rust,ignore
//! use domain_tree::adapters::InMemoryUnitOfWorkFactory;
//! use core_kernel::UnitOfWorkFactory;
//!
//! let factory = InMemoryUnitOfWorkFactory::new();
//! let uow = Arc::new(factory.begin().await?);
//! let notes = NoteService::new(uow);
//! ```

pub mod memory;

pub use memory::{InMemoryDatabase, InMemoryUnitOfWork, InMemoryUnitOfWorkFactory};
