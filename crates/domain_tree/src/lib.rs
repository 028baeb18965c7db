//! Family Tree Domain
//!
//! This crate holds the records attached to a family tree and the services
//! that manage them:
//!
//! - **Note**: free text, optionally attached to another record
//! - **MultimediaLink**: a reference to a media file, optionally attached
//! - **Family**: a couple and their children
//!
//! Each service is a thin facade over a repository obtained from an injected
//! unit of work. Writes are committed before the call returns.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use core_kernel::{TreeId, UnitOfWorkFactory};
//! use domain_tree::{Note, NoteService, Owner};
//! use domain_tree::adapters::InMemoryUnitOfWorkFactory;
//! use core_kernel::EntityId;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let factory = InMemoryUnitOfWorkFactory::new();
//! let notes = NoteService::new(Arc::new(factory.begin().await.unwrap()));
//!
//! let tree = TreeId::new(1);
//! let grandfather = Owner::individual(EntityId::new(12));
//! let note = notes
//!     .add(Note::new(tree, "Served aboard HMS Victory").owned_by(grandfather))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(notes.get_by_owner(tree, grandfather).await.unwrap(), vec![note]);
//! # });
//! ```

pub mod owner;
pub mod note;
pub mod multimedia_link;
pub mod family;
pub mod error;
pub mod service;
pub mod ports;
pub mod adapters;

pub use owner::{EntityKind, Owned, Owner};
pub use note::Note;
pub use multimedia_link::MultimediaLink;
pub use family::Family;
pub use error::TreeError;
pub use service::{EntityService, FamilyService, MultimediaLinkService, NoteService};
pub use ports::TreeUnitOfWork;
pub use adapters::{InMemoryDatabase, InMemoryUnitOfWork, InMemoryUnitOfWorkFactory};
