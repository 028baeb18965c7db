//! Pre-built Test Fixtures
//!
//! Provides fixed ids and sample values so that tests read the same way
//! across crates.

use core_kernel::{EntityId, TreeId};
use domain_tree::Owner;

/// Fixture for tree identifiers
pub struct TreeFixtures;

impl TreeFixtures {
    /// The tree most tests write to
    pub fn primary() -> TreeId {
        TreeId::new(1)
    }

    /// A second tree, used to check that reads never cross trees
    pub fn secondary() -> TreeId {
        TreeId::new(2)
    }

    /// A tree id the services must reject
    pub fn negative() -> TreeId {
        TreeId::new(-5)
    }
}

/// Fixture for individuals referenced by families and owners
pub struct IndividualFixtures;

impl IndividualFixtures {
    pub fn father() -> EntityId {
        EntityId::new(101)
    }

    pub fn mother() -> EntityId {
        EntityId::new(102)
    }

    pub fn first_child() -> EntityId {
        EntityId::new(103)
    }

    pub fn second_child() -> EntityId {
        EntityId::new(104)
    }

    /// Owner pointing at the father
    pub fn father_as_owner() -> Owner {
        Owner::individual(Self::father())
    }
}

/// Fixture for string values
pub struct StringFixtures;

impl StringFixtures {
    pub fn note_text() -> &'static str {
        "Emigrated from Cork to Boston in 1887"
    }

    pub fn photo_file() -> &'static str {
        "photos/wedding-1912.jpg"
    }

    pub fn photo_format() -> &'static str {
        "jpeg"
    }

    pub fn photo_title() -> &'static str {
        "Wedding portrait"
    }
}
