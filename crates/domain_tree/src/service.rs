//! Family tree domain services
//!
//! Each service is a facade over the repository of one entity type. It applies
//! the argument checks, forwards to the repository obtained from the unit of
//! work, and commits the unit of work after every write so that a change takes
//! effect as soon as the call returns.
//!
//! # Example
//!
//! ```rust,ignore
//! let service = NoteService::new(Arc::new(unit_of_work));
//! let note = service.add(Note::new(tree_id, "Emigrated in 1887")).await?;
//! let found = service.get(tree_id, note.id).await?;
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::{
    CoreError, Entity, EntityId, PagedList, PortError, Repository, RepositoryProvider, TreeId,
};

use crate::error::TreeError;
use crate::family::Family;
use crate::multimedia_link::MultimediaLink;
use crate::note::Note;
use crate::owner::{Owned, Owner};

/// Service managing the notes of a tree
pub type NoteService<U> = EntityService<Note, U>;

/// Service managing the multimedia links of a tree
pub type MultimediaLinkService<U> = EntityService<MultimediaLink, U>;

/// Service managing the families of a tree
pub type FamilyService<U> = EntityService<Family, U>;

/// CRUD facade over the repository of `E`
pub struct EntityService<E, U>
where
    E: Entity,
    U: RepositoryProvider<E>,
{
    unit_of_work: Arc<U>,
    repository: Arc<dyn Repository<E>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, U> Clone for EntityService<E, U>
where
    E: Entity,
    U: RepositoryProvider<E>,
{
    fn clone(&self) -> Self {
        Self {
            unit_of_work: Arc::clone(&self.unit_of_work),
            repository: Arc::clone(&self.repository),
            _entity: PhantomData,
        }
    }
}

impl<E, U> EntityService<E, U>
where
    E: Entity,
    U: RepositoryProvider<E>,
{
    /// Constructs a service that reads and writes through `unit_of_work`
    pub fn new(unit_of_work: Arc<U>) -> Self {
        let repository: Arc<dyn Repository<E>> = unit_of_work.repository();
        Self {
            unit_of_work,
            repository,
            _entity: PhantomData,
        }
    }

    /// Adds an entity to the store
    ///
    /// # Returns
    ///
    /// The stored entity, carrying the id assigned by the store
    ///
    /// # Errors
    ///
    /// * `TreeError::Validation` - negative tree id or entity invariants broken
    /// * `TreeError::Persistence` - the write or commit failed
    pub async fn add(&self, entity: E) -> Result<E, TreeError> {
        CoreError::require_not_negative("tree_id", entity.tree_id().value())?;
        entity.validate()?;

        let result = self.repository.add(entity).await;
        let stored = self.finish_write(result).await?;

        info!(kind = E::KIND, id = %stored.id(), tree = %stored.tree_id(), "Entity added");
        Ok(stored)
    }

    /// Replaces a stored entity
    ///
    /// # Errors
    ///
    /// * `TreeError::Validation` - negative id or entity invariants broken
    /// * `TreeError::NotFound` - no entity with that id in the tree
    pub async fn update(&self, entity: &E) -> Result<(), TreeError> {
        CoreError::require_not_negative("id", entity.id().value())?;
        entity.validate()?;

        let result = self.repository.update(entity).await;
        self.finish_write(result).await?;

        info!(kind = E::KIND, id = %entity.id(), tree = %entity.tree_id(), "Entity updated");
        Ok(())
    }

    /// Removes an entity from the store
    ///
    /// The delete takes effect immediately.
    ///
    /// # Errors
    ///
    /// * `TreeError::Validation` - negative id
    /// * `TreeError::NotFound` - no entity with that id in the tree
    pub async fn delete(&self, entity: &E) -> Result<(), TreeError> {
        CoreError::require_not_negative("id", entity.id().value())?;

        let result = self.repository.delete(entity).await;
        self.finish_write(result).await?;

        info!(kind = E::KIND, id = %entity.id(), tree = %entity.tree_id(), "Entity deleted");
        Ok(())
    }

    /// Retrieves a single entity of a tree
    ///
    /// # Returns
    ///
    /// The entity, or `None` if the tree holds no entity with that id
    pub async fn get(&self, tree_id: TreeId, id: EntityId) -> Result<Option<E>, TreeError> {
        CoreError::require_not_negative("id", id.value())?;
        CoreError::require_not_negative("tree_id", tree_id.value())?;

        debug!(kind = E::KIND, %tree_id, %id, "Fetching entity");
        Ok(self.repository.find(tree_id, id).await?)
    }

    /// Retrieves every entity of a tree, ordered by id
    pub async fn get_all(&self, tree_id: TreeId) -> Result<Vec<E>, TreeError> {
        CoreError::require_not_negative("tree_id", tree_id.value())?;

        debug!(kind = E::KIND, %tree_id, "Fetching all entities of tree");
        Ok(self.repository.get_by_tree(tree_id).await?)
    }

    /// Retrieves one page of the entities of a tree that satisfy `predicate`
    ///
    /// # Arguments
    ///
    /// * `tree_id` - The tree to read
    /// * `predicate` - Filter applied before paging
    /// * `page_index` - Zero-based page to return
    /// * `page_size` - Number of entities per page, must be positive
    pub async fn get_page<P>(
        &self,
        tree_id: TreeId,
        predicate: P,
        page_index: usize,
        page_size: usize,
    ) -> Result<PagedList<E>, TreeError>
    where
        P: Fn(&E) -> bool + Send,
    {
        let matching = self
            .get_all(tree_id)
            .await?
            .into_iter()
            .filter(|entity| predicate(entity));

        Ok(PagedList::new(matching, page_index, page_size)?)
    }

    /// Commits after a successful repository call, rolls back otherwise
    async fn finish_write<T>(&self, result: Result<T, PortError>) -> Result<T, TreeError> {
        let value = match result {
            Ok(value) => value,
            Err(error) => {
                self.roll_back(&error).await;
                return Err(error.into());
            }
        };

        if let Err(error) = self.unit_of_work.commit().await {
            self.roll_back(&error).await;
            return Err(error.into());
        }

        Ok(value)
    }

    async fn roll_back(&self, cause: &PortError) {
        warn!(kind = E::KIND, error = %cause, "Write failed, rolling back unit of work");
        if let Err(error) = self.unit_of_work.rollback().await {
            warn!(kind = E::KIND, %error, "Rollback failed");
        }
    }
}

impl<E, U> EntityService<E, U>
where
    E: Entity + Owned,
    U: RepositoryProvider<E>,
{
    /// Retrieves the entities of a tree attached to `owner`
    pub async fn get_by_owner(&self, tree_id: TreeId, owner: Owner) -> Result<Vec<E>, TreeError> {
        let mut entities = self.get_all(tree_id).await?;
        entities.retain(|entity| entity.owner() == Some(owner));
        Ok(entities)
    }
}

impl<U> EntityService<Family, U>
where
    U: RepositoryProvider<Family>,
{
    /// Retrieves the families in which the individual is husband or wife
    pub async fn get_by_spouse(
        &self,
        tree_id: TreeId,
        individual: EntityId,
    ) -> Result<Vec<Family>, TreeError> {
        let mut families = self.get_all(tree_id).await?;
        families.retain(|family| family.has_spouse(individual));
        Ok(families)
    }

    /// Retrieves the families in which the individual is a child
    pub async fn get_by_child(
        &self,
        tree_id: TreeId,
        individual: EntityId,
    ) -> Result<Vec<Family>, TreeError> {
        let mut families = self.get_all(tree_id).await?;
        families.retain(|family| family.has_child(individual));
        Ok(families)
    }
}
