//! Multimedia link DTOs

use serde::Deserialize;
use validator::Validate;

use core_kernel::{EntityId, TreeId};
use domain_tree::MultimediaLink;

use super::OwnerRequest;

/// Body of a multimedia link create or update
#[derive(Debug, Deserialize, Validate)]
pub struct MultimediaLinkRequest {
    #[validate(nested)]
    pub owner: Option<OwnerRequest>,
    #[validate(length(min = 1, max = 1024))]
    pub file: String,
    #[validate(length(max = 50))]
    pub format: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: String,
}

impl MultimediaLinkRequest {
    pub fn into_link(self, tree_id: TreeId, id: EntityId) -> MultimediaLink {
        MultimediaLink {
            id,
            tree_id,
            owner: self.owner.map(Into::into),
            file: self.file,
            format: self.format,
            title: self.title,
        }
    }
}
