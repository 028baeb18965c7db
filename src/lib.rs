//! Family Tree Core
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`kernel`] - identifiers, paging and data access ports
//! - [`tree`] - notes, multimedia links, families and their services
//! - [`db`] - the PostgreSQL unit of work
//! - [`api`] - the HTTP router and configuration

pub use core_kernel as kernel;
pub use domain_tree as tree;
pub use infra_db as db;
pub use interface_api as api;
