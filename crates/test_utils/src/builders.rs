//! Test Data Builders
//!
//! Provides builder patterns for constructing test entities with sensible
//! defaults. Tests set only the fields they care about.

use fake::faker::lorem::en::Sentence;
use fake::Fake;

use core_kernel::{EntityId, TreeId};
use domain_tree::{Family, MultimediaLink, Note, Owner};

use crate::fixtures::{IndividualFixtures, StringFixtures, TreeFixtures};

/// Builder for notes
#[derive(Debug, Clone)]
pub struct NoteBuilder {
    id: EntityId,
    tree_id: TreeId,
    owner: Option<Owner>,
    text: String,
}

impl Default for NoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteBuilder {
    /// Creates an unsaved note in the primary tree
    pub fn new() -> Self {
        Self {
            id: EntityId::UNSAVED,
            tree_id: TreeFixtures::primary(),
            owner: None,
            text: StringFixtures::note_text().to_string(),
        }
    }

    /// Uses a random sentence as the note text
    pub fn with_random_text(mut self) -> Self {
        self.text = Sentence(3..10).fake();
        self
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn in_tree(mut self, tree_id: TreeId) -> Self {
        self.tree_id = tree_id;
        self
    }

    pub fn owned_by(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn build(self) -> Note {
        Note {
            id: self.id,
            tree_id: self.tree_id,
            owner: self.owner,
            text: self.text,
        }
    }
}

/// Builder for multimedia links
#[derive(Debug, Clone)]
pub struct MultimediaLinkBuilder {
    id: EntityId,
    tree_id: TreeId,
    owner: Option<Owner>,
    file: String,
    format: String,
    title: String,
}

impl Default for MultimediaLinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MultimediaLinkBuilder {
    /// Creates an unsaved photo link in the primary tree
    pub fn new() -> Self {
        Self {
            id: EntityId::UNSAVED,
            tree_id: TreeFixtures::primary(),
            owner: None,
            file: StringFixtures::photo_file().to_string(),
            format: StringFixtures::photo_format().to_string(),
            title: StringFixtures::photo_title().to_string(),
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn in_tree(mut self, tree_id: TreeId) -> Self {
        self.tree_id = tree_id;
        self
    }

    pub fn owned_by(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn build(self) -> MultimediaLink {
        MultimediaLink {
            id: self.id,
            tree_id: self.tree_id,
            owner: self.owner,
            file: self.file,
            format: self.format,
            title: self.title,
        }
    }
}

/// Builder for families
#[derive(Debug, Clone)]
pub struct FamilyBuilder {
    id: EntityId,
    tree_id: TreeId,
    husband_id: Option<EntityId>,
    wife_id: Option<EntityId>,
    child_ids: Vec<EntityId>,
}

impl Default for FamilyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyBuilder {
    /// Creates an empty unsaved family in the primary tree
    pub fn new() -> Self {
        Self {
            id: EntityId::UNSAVED,
            tree_id: TreeFixtures::primary(),
            husband_id: None,
            wife_id: None,
            child_ids: Vec::new(),
        }
    }

    /// The fixture couple with their two children
    pub fn nuclear() -> Self {
        Self::new()
            .with_husband(IndividualFixtures::father())
            .with_wife(IndividualFixtures::mother())
            .with_child(IndividualFixtures::first_child())
            .with_child(IndividualFixtures::second_child())
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn in_tree(mut self, tree_id: TreeId) -> Self {
        self.tree_id = tree_id;
        self
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

    pub fn build(self) -> Family {
        Family {
            id: self.id,
            tree_id: self.tree_id,
            husband_id: self.husband_id,
            wife_id: self.wife_id,
            child_ids: self.child_ids,
        }
    }
}
