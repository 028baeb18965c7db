//! Note entity
//!
//! Free text attached to a tree, optionally to a specific record in it.

use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, Entity, EntityId, TreeId};
use crate::owner::{Owned, Owner};

/// A free-text note belonging to a family tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: EntityId,
    pub tree_id: TreeId,
    pub owner: Option<Owner>,
    pub text: String,
}

impl Note {
    /// Creates an unsaved note
    pub fn new(tree_id: TreeId, text: impl Into<String>) -> Self {
        Self {
            id: EntityId::UNSAVED,
            tree_id,
            owner: None,
            text: text.into(),
        }
    }

    /// Attaches the note to a record of the tree
    pub fn owned_by(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl Entity for Note {
    const KIND: &'static str = "Note";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn tree_id(&self) -> TreeId {
        self.tree_id
    }

    fn validate(&self) -> Result<(), CoreError> {
        self.owner.as_ref().map_or(Ok(()), Owner::validate)
    }
}

impl Owned for Note {
    fn owner(&self) -> Option<Owner> {
        self.owner
    }
}
