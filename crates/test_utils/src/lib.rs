//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! family tree test suite.
//!
//! # Modules
//!
//! - `fixtures`: Well-known tree ids and sample values
//! - `builders`: Builder patterns for test entities
//! - `database`: PostgreSQL test containers with the schema applied
//! - `assertions`: Assertion helpers for entities and pages
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
