//! Family entity
//!
//! A family groups a couple (either partner may be unknown) with their
//! children. Members are referenced by the ids of individual records.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use core_kernel::{CoreError, Entity, EntityId, TreeId};

/// A couple and their children within a family tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: EntityId,
    pub tree_id: TreeId,
    pub husband_id: Option<EntityId>,
    pub wife_id: Option<EntityId>,
    #[serde(default)]
    pub child_ids: Vec<EntityId>,
}

impl Family {
    /// Creates an unsaved family with no members
    pub fn new(tree_id: TreeId) -> Self {
        Self {
            id: EntityId::UNSAVED,
            tree_id,
            husband_id: None,
            wife_id: None,
            child_ids: Vec::new(),
        }
    }

    pub fn with_husband(mut self, individual: EntityId) -> Self {
        self.husband_id = Some(individual);
        self
    }

    pub fn with_wife(mut self, individual: EntityId) -> Self {
        self.wife_id = Some(individual);
        self
    }

    pub fn with_child(mut self, individual: EntityId) -> Self {
        self.child_ids.push(individual);
        self
    }

    /// Returns true if the individual is one of the couple
    pub fn has_spouse(&self, individual: EntityId) -> bool {
        self.husband_id == Some(individual) || self.wife_id == Some(individual)
    }

    /// Returns true if the individual is listed as a child
    pub fn has_child(&self, individual: EntityId) -> bool {
        self.child_ids.contains(&individual)
    }
}

impl Entity for Family {
    const KIND: &'static str = "Family";

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
        if let Some(husband) = self.husband_id {
            CoreError::require_not_negative("husband_id", husband.value())?;
        }
        if let Some(wife) = self.wife_id {
            CoreError::require_not_negative("wife_id", wife.value())?;
        }
        for child in &self.child_ids {
            CoreError::require_not_negative("child_ids", child.value())?;
        }

        if let (Some(husband), Some(wife)) = (self.husband_id, self.wife_id) {
            if husband == wife {
                return Err(CoreError::validation(format!(
                    "{} cannot be both husband and wife",
                    husband
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.child_ids.len());
        for child in &self.child_ids {
            if self.has_spouse(*child) {
                return Err(CoreError::validation(format!(
                    "{} cannot be both a spouse and a child of the same family",
                    child
                )));
            }
            if !seen.insert(*child) {
                return Err(CoreError::validation(format!("{} is listed twice as a child", child)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> TreeId {
        TreeId::new(1)
    }

    #[test]
    fn test_same_husband_and_wife_rejected() {
        let family = Family::new(tree())
            .with_husband(EntityId::new(3))
            .with_wife(EntityId::new(3));
        assert!(family.validate().is_err());
    }

    #[test]
    fn test_spouse_as_child_rejected() {
        let family = Family::new(tree())
            .with_husband(EntityId::new(3))
            .with_child(EntityId::new(3));
        assert!(family.validate().is_err());
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let family = Family::new(tree())
            .with_child(EntityId::new(9))
            .with_child(EntityId::new(9));
        assert!(family.validate().is_err());
    }

    #[test]
    fn test_negative_member_ids_rejected() {
        let husband = Family::new(tree()).with_husband(EntityId::new(-1));
        assert_eq!(husband.validate().unwrap_err().field(), Some("husband_id"));

        let wife = Family::new(tree()).with_wife(EntityId::UNSAVED);
        assert_eq!(wife.validate().unwrap_err().field(), Some("wife_id"));

        let children = Family::new(tree())
            .with_child(EntityId::new(8))
            .with_child(EntityId::new(-7));
        assert_eq!(children.validate().unwrap_err().field(), Some("child_ids"));
    }

    #[test]
    fn test_single_parent_family_is_valid() {
        let family = Family::new(tree())
            .with_wife(EntityId::new(4))
            .with_child(EntityId::new(5))
            .with_child(EntityId::new(6));
        assert!(family.validate().is_ok());
        assert!(family.has_spouse(EntityId::new(4)));
        assert!(family.has_child(EntityId::new(6)));
    }
}
