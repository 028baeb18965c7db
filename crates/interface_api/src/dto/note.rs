//! Note DTOs

use serde::Deserialize;
use validator::Validate;

use core_kernel::{EntityId, TreeId};
use domain_tree::Note;

use super::OwnerRequest;

/// Body of a note create or update
#[derive(Debug, Deserialize, Validate)]
pub struct NoteRequest {
    #[validate(nested)]
    pub owner: Option<OwnerRequest>,
    #[validate(length(min = 1, message = "note text must not be empty"))]
    pub text: String,
}

impl NoteRequest {
    pub fn into_note(self, tree_id: TreeId, id: EntityId) -> Note {
        Note {
            id,
            tree_id,
            owner: self.owner.map(Into::into),
            text: self.text,
        }
    }
}
