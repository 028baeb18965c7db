//! In-memory unit of work
//!
//! A shared [`InMemoryDatabase`] holds the committed rows of every entity
//! type. Each [`InMemoryUnitOfWork`] stages its writes privately and applies
//! them on commit: all staged changes are replayed against copies of the
//! tables, and the copies replace the committed tables only if every change
//! succeeded. Reads always see committed rows.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use core_kernel::{
    Entity, EntityId, HealthCheckResult, HealthCheckable, PortError, Repository,
    RepositoryProvider, TreeId, UnitOfWork, UnitOfWorkFactory,
};

use crate::family::Family;
use crate::multimedia_link::MultimediaLink;
use crate::note::Note;

/// Committed rows of one entity type plus its id sequence
#[derive(Debug)]
struct Table<E> {
    rows: RwLock<BTreeMap<EntityId, E>>,
    sequence: AtomicI64,
}

impl<E: Entity> Table<E> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(1),
        }
    }

    fn next_id(&self) -> EntityId {
        EntityId::new(self.sequence.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Debug, Clone)]
enum Change<E> {
    Insert(E),
    Update(E),
    Delete { tree_id: TreeId, id: EntityId },
}

/// Replays staged changes against `rows`, failing on the first change that
/// targets a missing row
fn replay<E: Entity>(
    rows: &mut BTreeMap<EntityId, E>,
    changes: Vec<Change<E>>,
) -> Result<(), PortError> {
    for change in changes {
        match change {
            Change::Insert(entity) => {
                if rows.contains_key(&entity.id()) {
                    return Err(PortError::conflict(format!(
                        "{} {} already exists",
                        E::KIND,
                        entity.id()
                    )));
                }
                rows.insert(entity.id(), entity);
            }
            Change::Update(entity) => match rows.get_mut(&entity.id()) {
                Some(existing) if existing.tree_id() == entity.tree_id() => *existing = entity,
                _ => return Err(PortError::not_found(E::KIND, entity.id())),
            },
            Change::Delete { tree_id, id } => match rows.get(&id) {
                Some(existing) if existing.tree_id() == tree_id => {
                    rows.remove(&id);
                }
                _ => return Err(PortError::not_found(E::KIND, id)),
            },
        }
    }
    Ok(())
}

/// Process-local store shared by every unit of work created from it
#[derive(Debug)]
pub struct InMemoryDatabase {
    notes: Arc<Table<Note>>,
    multimedia_links: Arc<Table<MultimediaLink>>,
    families: Arc<Table<Family>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(Table::new()),
            multimedia_links: Arc::new(Table::new()),
            families: Arc::new(Table::new()),
        }
    }

    /// Number of committed notes across all trees
    pub async fn note_count(&self) -> usize {
        self.notes.rows.read().await.len()
    }

    /// Number of committed multimedia links across all trees
    pub async fn multimedia_link_count(&self) -> usize {
        self.multimedia_links.rows.read().await.len()
    }

    /// Number of committed families across all trees
    pub async fn family_count(&self) -> usize {
        self.families.rows.read().await.len()
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Repository view of one table with writes staged in the owning unit of work
struct StagedRepository<E> {
    table: Arc<Table<E>>,
    pending: Mutex<Vec<Change<E>>>,
}

impl<E: Entity> StagedRepository<E> {
    fn new(table: Arc<Table<E>>) -> Self {
        Self {
            table,
            pending: Mutex::new(Vec::new()),
        }
    }

    async fn take_pending(&self) -> Vec<Change<E>> {
        std::mem::take(&mut *self.pending.lock().await)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for StagedRepository<E> {
    async fn add(&self, mut entity: E) -> Result<E, PortError> {
        entity.set_id(self.table.next_id());
        self.pending.lock().await.push(Change::Insert(entity.clone()));
        Ok(entity)
    }

    async fn update(&self, entity: &E) -> Result<(), PortError> {
        self.pending.lock().await.push(Change::Update(entity.clone()));
        Ok(())
    }

    async fn delete(&self, entity: &E) -> Result<(), PortError> {
        self.pending.lock().await.push(Change::Delete {
            tree_id: entity.tree_id(),
            id: entity.id(),
        });
        Ok(())
    }

    async fn find(&self, tree_id: TreeId, id: EntityId) -> Result<Option<E>, PortError> {
        let rows = self.table.rows.read().await;
        Ok(rows.get(&id).filter(|entity| entity.tree_id() == tree_id).cloned())
    }

    async fn get_by_tree(&self, tree_id: TreeId) -> Result<Vec<E>, PortError> {
        let rows = self.table.rows.read().await;
        Ok(rows
            .values()
            .filter(|entity| entity.tree_id() == tree_id)
            .cloned()
            .collect())
    }
}

/// Unit of work over an [`InMemoryDatabase`]
pub struct InMemoryUnitOfWork {
    database: Arc<InMemoryDatabase>,
    notes: Arc<StagedRepository<Note>>,
    multimedia_links: Arc<StagedRepository<MultimediaLink>>,
    families: Arc<StagedRepository<Family>>,
}

impl InMemoryUnitOfWork {
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self {
            notes: Arc::new(StagedRepository::new(Arc::clone(&database.notes))),
            multimedia_links: Arc::new(StagedRepository::new(Arc::clone(&database.multimedia_links))),
            families: Arc::new(StagedRepository::new(Arc::clone(&database.families))),
            database,
        }
    }

    /// The store this unit of work commits into
    pub fn database(&self) -> &Arc<InMemoryDatabase> {
        &self.database
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(&self) -> Result<(), PortError> {
        let note_changes = self.notes.take_pending().await;
        let link_changes = self.multimedia_links.take_pending().await;
        let family_changes = self.families.take_pending().await;

        // Fixed lock order across all units of work
        let mut notes = self.database.notes.rows.write().await;
        let mut links = self.database.multimedia_links.rows.write().await;
        let mut families = self.database.families.rows.write().await;

        let mut next_notes = notes.clone();
        let mut next_links = links.clone();
        let mut next_families = families.clone();
        replay(&mut next_notes, note_changes)?;
        replay(&mut next_links, link_changes)?;
        replay(&mut next_families, family_changes)?;

        *notes = next_notes;
        *links = next_links;
        *families = next_families;

        debug!("In-memory unit of work committed");
        Ok(())
    }

    async fn rollback(&self) -> Result<(), PortError> {
        self.notes.take_pending().await;
        self.multimedia_links.take_pending().await;
        self.families.take_pending().await;
        Ok(())
    }
}

impl RepositoryProvider<Note> for InMemoryUnitOfWork {
    fn repository(&self) -> Arc<dyn Repository<Note>> {
        self.notes.clone()
    }
}

impl RepositoryProvider<MultimediaLink> for InMemoryUnitOfWork {
    fn repository(&self) -> Arc<dyn Repository<MultimediaLink>> {
        self.multimedia_links.clone()
    }
}

impl RepositoryProvider<Family> for InMemoryUnitOfWork {
    fn repository(&self) -> Arc<dyn Repository<Family>> {
        self.families.clone()
    }
}

/// Hands out units of work over one shared [`InMemoryDatabase`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitOfWorkFactory {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Arc<InMemoryDatabase> {
        &self.database
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    type UnitOfWork = InMemoryUnitOfWork;

    async fn begin(&self) -> Result<Self::UnitOfWork, PortError> {
        Ok(InMemoryUnitOfWork::new(Arc::clone(&self.database)))
    }
}

#[async_trait]
impl HealthCheckable for InMemoryUnitOfWorkFactory {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("in-memory", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> TreeId {
        TreeId::new(1)
    }

    #[tokio::test]
    async fn test_staged_insert_invisible_until_commit() {
        let uow = InMemoryUnitOfWork::new(Arc::new(InMemoryDatabase::new()));
        let repo: Arc<dyn Repository<Note>> = uow.repository();

        let note = repo.add(Note::new(tree(), "staged")).await.unwrap();
        assert!(repo.find(tree(), note.id).await.unwrap().is_none());

        uow.commit().await.unwrap();
        assert_eq!(repo.find(tree(), note.id).await.unwrap(), Some(note));
    }

    #[tokio::test]
    async fn test_rollback_discards_staged_changes() {
        let database = Arc::new(InMemoryDatabase::new());
        let uow = InMemoryUnitOfWork::new(Arc::clone(&database));
        let repo: Arc<dyn Repository<Family>> = uow.repository();

        repo.add(Family::new(tree())).await.unwrap();
        uow.rollback().await.unwrap();
        uow.commit().await.unwrap();

        assert_eq!(database.family_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_commit_applies_nothing() {
        let database = Arc::new(InMemoryDatabase::new());
        let uow = InMemoryUnitOfWork::new(Arc::clone(&database));
        let notes: Arc<dyn Repository<Note>> = uow.repository();
        let families: Arc<dyn Repository<Family>> = uow.repository();

        notes.add(Note::new(tree(), "kept back")).await.unwrap();
        let mut ghost = Family::new(tree());
        ghost.id = EntityId::new(404);
        families.update(&ghost).await.unwrap();

        let error = uow.commit().await.unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(database.note_count().await, 0);
    }

    #[tokio::test]
    async fn test_find_is_scoped_to_tree() {
        let uow = InMemoryUnitOfWork::new(Arc::new(InMemoryDatabase::new()));
        let repo: Arc<dyn Repository<Note>> = uow.repository();
        let note = repo.add(Note::new(tree(), "tree one")).await.unwrap();
        uow.commit().await.unwrap();

        assert!(repo.find(TreeId::new(2), note.id).await.unwrap().is_none());
    }
}
