//! Family Tree Domain Ports
//!
//! The services in this crate are generic over the unit of work they are
//! given. [`TreeUnitOfWork`] bundles the repository capabilities a unit of
//! work needs to back all three services, so application code can name a
//! single bound.
//!
//! ```rust,ignore
//! async fn import<U: TreeUnitOfWork>(uow: Arc<U>, notes: Vec<Note>) -> Result<(), TreeError> {
//!     let service = NoteService::new(uow);
//!     for note in notes {
//!         service.add(note).await?;
//!     }
//!     Ok(())
//! }
//! ```

use core_kernel::RepositoryProvider;

use crate::family::Family;
use crate::multimedia_link::MultimediaLink;
use crate::note::Note;

/// A unit of work that provides every family tree repository
pub trait TreeUnitOfWork:
    RepositoryProvider<Note> + RepositoryProvider<MultimediaLink> + RepositoryProvider<Family>
{
}

impl<T> TreeUnitOfWork for T where
    T: RepositoryProvider<Note> + RepositoryProvider<MultimediaLink> + RepositoryProvider<Family>
{
}
