//! Family DTOs

use serde::Deserialize;
use validator::Validate;

use core_kernel::{EntityId, TreeId};
use domain_tree::Family;

/// Body of a family create or update
#[derive(Debug, Deserialize, Validate)]
pub struct FamilyRequest {
    #[validate(range(min = 0))]
    pub husband_id: Option<i64>,
    #[validate(range(min = 0))]
    pub wife_id: Option<i64>,
    #[serde(default)]
    pub child_ids: Vec<i64>,
}

impl FamilyRequest {
    pub fn into_family(self, tree_id: TreeId, id: EntityId) -> Family {
        Family {
            id,
            tree_id,
            husband_id: self.husband_id.map(EntityId::new),
            wife_id: self.wife_id.map(EntityId::new),
            child_ids: self.child_ids.into_iter().map(EntityId::new).collect(),
        }
    }
}

/// Family list filters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FamilyQuery {
    /// Families with this individual as husband or wife
    pub spouse: Option<i64>,
    /// Families with this individual among the children
    pub child: Option<i64>,
}
