//! Note repository implementation
//!
//! Notes live in the `notes` table. The optional owner is stored as an
//! `(owner_id, owner_kind)` column pair that is either fully set or fully null.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{debug, instrument};

use core_kernel::{EntityId, PortError, Repository, TreeId};
use domain_tree::Note;

use super::{owner_columns, owner_from_columns};
use crate::error::DatabaseError;
use crate::session::PgSession;

/// Database row for a note
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: i64,
    pub tree_id: i64,
    pub owner_id: Option<i64>,
    pub owner_kind: Option<String>,
    pub text: String,
}

impl TryFrom<NoteRow> for Note {
    type Error = DatabaseError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        Ok(Note {
            id: EntityId::new(row.id),
            tree_id: TreeId::new(row.tree_id),
            owner: owner_from_columns(row.owner_id, row.owner_kind)?,
            text: row.text,
        })
    }
}

/// Repository for notes
#[derive(Debug, Clone)]
pub struct NoteRepository {
    session: Arc<PgSession>,
}

impl NoteRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }

    async fn insert(&self, note: &Note) -> Result<EntityId, DatabaseError> {
        let (owner_id, owner_kind) = owner_columns(note.owner);

        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO notes (tree_id, owner_id, owner_kind, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(note.tree_id.value())
        .bind(owner_id)
        .bind(owner_kind)
        .bind(&note.text)
        .fetch_one(&mut **tx)
        .await?;

        Ok(EntityId::new(id))
    }

    async fn replace(&self, note: &Note) -> Result<(), DatabaseError> {
        let (owner_id, owner_kind) = owner_columns(note.owner);

        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET owner_id = $3, owner_kind = $4, text = $5
            WHERE id = $1 AND tree_id = $2
            "#,
        )
        .bind(note.id.value())
        .bind(note.tree_id.value())
        .bind(owner_id)
        .bind(owner_kind)
        .bind(&note.text)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Note", note.id));
        }
        Ok(())
    }

    async fn remove(&self, note: &Note) -> Result<(), DatabaseError> {
        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND tree_id = $2")
            .bind(note.id.value())
            .bind(note.tree_id.value())
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Note", note.id));
        }
        Ok(())
    }

    async fn select_one(&self, tree_id: TreeId, id: EntityId) -> Result<Option<Note>, DatabaseError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, tree_id, owner_id, owner_kind, text
            FROM notes
            WHERE id = $1 AND tree_id = $2
            "#,
        )
        .bind(id.value())
        .bind(tree_id.value())
        .fetch_optional(self.session.pool())
        .await?;

        row.map(Note::try_from).transpose()
    }

    async fn select_tree(&self, tree_id: TreeId) -> Result<Vec<Note>, DatabaseError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, tree_id, owner_id, owner_kind, text
            FROM notes
            WHERE tree_id = $1
            ORDER BY id
            "#,
        )
        .bind(tree_id.value())
        .fetch_all(self.session.pool())
        .await?;

        rows.into_iter().map(Note::try_from).collect()
    }
}

#[async_trait]
impl Repository<Note> for NoteRepository {
    #[instrument(skip(self, entity), fields(tree = %entity.tree_id))]
    async fn add(&self, mut entity: Note) -> Result<Note, PortError> {
        entity.id = self.insert(&entity).await?;
        debug!(id = %entity.id, "Inserted note");
        Ok(entity)
    }

    #[instrument(skip(self, entity), fields(id = %entity.id))]
    async fn update(&self, entity: &Note) -> Result<(), PortError> {
        Ok(self.replace(entity).await?)
    }

    #[instrument(skip(self, entity), fields(id = %entity.id))]
    async fn delete(&self, entity: &Note) -> Result<(), PortError> {
        Ok(self.remove(entity).await?)
    }

    async fn find(&self, tree_id: TreeId, id: EntityId) -> Result<Option<Note>, PortError> {
        Ok(self.select_one(tree_id, id).await?)
    }

    async fn get_by_tree(&self, tree_id: TreeId) -> Result<Vec<Note>, PortError> {
        Ok(self.select_tree(tree_id).await?)
    }
}
