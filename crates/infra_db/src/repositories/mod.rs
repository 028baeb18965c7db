//! Repository implementations for family tree entities
//!
//! This module contains the PostgreSQL repositories behind the domain
//! `Repository` port:
//!
//! - `note` - Free text notes attached to tree entities
//! - `multimedia_link` - References to media files
//! - `family` - Couples and their children
//!
//! Writes run inside the transaction of the owning [`PgSession`](crate::PgSession);
//! reads go straight to the pool.

pub mod note;
pub mod multimedia_link;
pub mod family;

pub use note::NoteRepository;
pub use multimedia_link::MultimediaLinkRepository;
pub use family::FamilyRepository;

use core_kernel::EntityId;
use domain_tree::{EntityKind, Owner};

use crate::error::DatabaseError;

/// Rebuilds an owner from its two nullable columns
pub(crate) fn owner_from_columns(
    owner_id: Option<i64>,
    owner_kind: Option<String>,
) -> Result<Option<Owner>, DatabaseError> {
    match (owner_id, owner_kind) {
        (Some(id), Some(kind)) => {
            let kind: EntityKind = kind
                .parse()
                .map_err(|e: core_kernel::CoreError| DatabaseError::CorruptRow(e.to_string()))?;
            Ok(Some(Owner::new(kind, EntityId::new(id))))
        }
        (None, None) => Ok(None),
        (id, kind) => Err(DatabaseError::CorruptRow(format!(
            "owner columns must be set together (owner_id={:?}, owner_kind={:?})",
            id, kind
        ))),
    }
}

/// Splits an owner into the values bound to `owner_id` and `owner_kind`
pub(crate) fn owner_columns(owner: Option<Owner>) -> (Option<i64>, Option<&'static str>) {
    match owner {
        Some(owner) => (Some(owner.id.value()), Some(owner.kind.as_str())),
        None => (None, None),
    }
}
