//! Ownership of attached records
//!
//! Notes and multimedia links hang off another record of the tree: an
//! individual, a family, a source and so on. [`Owner`] names that record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, EntityId};

/// The kinds of record a genealogy tree is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Individual,
    Family,
    Fact,
    Source,
    Repository,
    Citation,
    Note,
    MultimediaLink,
}

impl EntityKind {
    /// Stable storage name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Individual => "individual",
            EntityKind::Family => "family",
            EntityKind::Fact => "fact",
            EntityKind::Source => "source",
            EntityKind::Repository => "repository",
            EntityKind::Citation => "citation",
            EntityKind::Note => "note",
            EntityKind::MultimediaLink => "multimedia_link",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(EntityKind::Individual),
            "family" => Ok(EntityKind::Family),
            "fact" => Ok(EntityKind::Fact),
            "source" => Ok(EntityKind::Source),
            "repository" => Ok(EntityKind::Repository),
            "citation" => Ok(EntityKind::Citation),
            "note" => Ok(EntityKind::Note),
            "multimedia_link" => Ok(EntityKind::MultimediaLink),
            other => Err(CoreError::validation(format!("unknown entity kind '{}'", other))),
        }
    }
}

/// The record an attached note or link belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Owner {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl Owner {
    pub fn new(kind: EntityKind, id: EntityId) -> Self {
        Self { id, kind }
    }

    pub fn individual(id: EntityId) -> Self {
        Self::new(EntityKind::Individual, id)
    }

    pub fn family(id: EntityId) -> Self {
        Self::new(EntityKind::Family, id)
    }

    /// An owner must reference a stored record
    pub fn validate(&self) -> Result<(), CoreError> {
        CoreError::require_not_negative("owner.id", self.id.value())
    }
}

/// Records that can be attached to an owner
pub trait Owned {
    fn owner(&self) -> Option<Owner>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_through_storage_name() {
        for kind in [
            EntityKind::Individual,
            EntityKind::Family,
            EntityKind::Fact,
            EntityKind::Source,
            EntityKind::Repository,
            EntityKind::Citation,
            EntityKind::Note,
            EntityKind::MultimediaLink,
        ] {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!("household".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_owner_with_unsaved_id_rejected() {
        let error = Owner::individual(EntityId::UNSAVED).validate().unwrap_err();
        assert_eq!(error.field(), Some("owner.id"));
        assert!(Owner::family(EntityId::new(0)).validate().is_ok());
    }

    #[test]
    fn test_owner_json_uses_storage_names() {
        let owner = Owner::new(EntityKind::MultimediaLink, EntityId::new(3));
        let json = serde_json::to_value(owner).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "kind": "multimedia_link" }));
    }
}
