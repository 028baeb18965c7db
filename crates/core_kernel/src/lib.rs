//! Core Kernel - Foundational types shared by the family tree crates
//!
//! This crate provides the building blocks used by the domain and
//! infrastructure layers:
//! - Strongly-typed tree and entity identifiers
//! - Paged result sets
//! - The repository / unit-of-work ports the domain services depend on

pub mod identifiers;
pub mod paging;
pub mod ports;
pub mod error;

pub use identifiers::{TreeId, EntityId};
pub use paging::PagedList;
pub use ports::{
    BoxError, PortError, Entity, Repository, UnitOfWork, RepositoryProvider, UnitOfWorkFactory,
    AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
