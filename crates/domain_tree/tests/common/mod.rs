//! Shared helpers for the service tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{Entity, PortError, Repository, RepositoryProvider, TreeId, UnitOfWork};
use domain_tree::adapters::{InMemoryDatabase, InMemoryUnitOfWork};

pub fn tree() -> TreeId {
    TreeId::new(1)
}

pub fn other_tree() -> TreeId {
    TreeId::new(2)
}

/// Wraps the in-memory unit of work, counting commits and rollbacks and
/// optionally failing every commit
pub struct RecordingUnitOfWork {
    inner: InMemoryUnitOfWork,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    fail_commits: AtomicBool,
}

impl RecordingUnitOfWork {
    pub fn new() -> Arc<Self> {
        Self::over(Arc::new(InMemoryDatabase::new()))
    }

    pub fn over(database: Arc<InMemoryDatabase>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryUnitOfWork::new(database),
            commits: AtomicUsize::new(0),
            rollbacks: AtomicUsize::new(0),
            fail_commits: AtomicBool::new(false),
        })
    }

    pub fn database(&self) -> &Arc<InMemoryDatabase> {
        self.inner.database()
    }

    pub fn fail_commits(&self) {
        self.fail_commits.store(true, Ordering::SeqCst);
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnitOfWork for RecordingUnitOfWork {
    async fn commit(&self) -> Result<(), PortError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(PortError::connection("connection reset during commit"));
        }
        self.inner.commit().await?;
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self) -> Result<(), PortError> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        self.inner.rollback().await
    }
}

impl<E> RepositoryProvider<E> for RecordingUnitOfWork
where
    E: Entity,
    InMemoryUnitOfWork: RepositoryProvider<E>,
{
    fn repository(&self) -> Arc<dyn Repository<E>> {
        self.inner.repository()
    }
}
