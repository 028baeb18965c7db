//! Multimedia link entity
//!
//! Points at an external media file (photo, scan, recording) and optionally
//! ties it to a record of the tree.

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CoreError, Entity, EntityId, TreeId};
use crate::owner::{Owned, Owner};

/// A link to a media file belonging to a family tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MultimediaLink {
    pub id: EntityId,
    pub tree_id: TreeId,
    pub owner: Option<Owner>,
    /// Path or URL of the media file
    #[validate(length(min = 1, max = 1024))]
    pub file: String,
    /// Media format, e.g. "jpeg" or "pdf"
    #[validate(length(max = 50))]
    pub format: String,
    #[validate(length(max = 255))]
    pub title: String,
}

impl MultimediaLink {
    /// Creates an unsaved link to `file`
    pub fn new(tree_id: TreeId, file: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            id: EntityId::UNSAVED,
            tree_id,
            owner: None,
            file: file.into(),
            format: format.into(),
            title: String::new(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn owned_by(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl Entity for MultimediaLink {
    const KIND: &'static str = "MultimediaLink";

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
        Validate::validate(self)
            .map_err(|errors| CoreError::validation(format!("invalid multimedia link: {}", errors)))?;
        self.owner.as_ref().map_or(Ok(()), Owner::validate)
    }
}

impl Owned for MultimediaLink {
    fn owner(&self) -> Option<Owner> {
        self.owner
    }
}
