//! Multimedia link repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{debug, instrument};

use core_kernel::{EntityId, PortError, Repository, TreeId};
use domain_tree::MultimediaLink;

use super::{owner_columns, owner_from_columns};
use crate::error::DatabaseError;
use crate::session::PgSession;

const SELECT_COLUMNS: &str = "SELECT id, tree_id, owner_id, owner_kind, file, format, title FROM multimedia_links";

/// Database row for a multimedia link
#[derive(Debug, Clone, FromRow)]
pub struct MultimediaLinkRow {
    pub id: i64,
    pub tree_id: i64,
    pub owner_id: Option<i64>,
    pub owner_kind: Option<String>,
    pub file: String,
    pub format: String,
    pub title: String,
}

impl TryFrom<MultimediaLinkRow> for MultimediaLink {
    type Error = DatabaseError;

    fn try_from(row: MultimediaLinkRow) -> Result<Self, Self::Error> {
        Ok(MultimediaLink {
            id: EntityId::new(row.id),
            tree_id: TreeId::new(row.tree_id),
            owner: owner_from_columns(row.owner_id, row.owner_kind)?,
            file: row.file,
            format: row.format,
            title: row.title,
        })
    }
}

/// Repository for multimedia links
#[derive(Debug, Clone)]
pub struct MultimediaLinkRepository {
    session: Arc<PgSession>,
}

impl MultimediaLinkRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<MultimediaLink> for MultimediaLinkRepository {
    #[instrument(skip(self, entity), fields(tree = %entity.tree_id))]
    async fn add(&self, mut entity: MultimediaLink) -> Result<MultimediaLink, PortError> {
        let (owner_id, owner_kind) = owner_columns(entity.owner);

        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO multimedia_links (tree_id, owner_id, owner_kind, file, format, title)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(entity.tree_id.value())
        .bind(owner_id)
        .bind(owner_kind)
        .bind(&entity.file)
        .bind(&entity.format)
        .bind(&entity.title)
        .fetch_one(&mut **tx)
        .await
        .map_err(DatabaseError::from)?;

        entity.id = EntityId::new(id);
        debug!(id = %entity.id, "Inserted multimedia link");
        Ok(entity)
    }

    #[instrument(skip(self, entity), fields(id = %entity.id))]
    async fn update(&self, entity: &MultimediaLink) -> Result<(), PortError> {
        let (owner_id, owner_kind) = owner_columns(entity.owner);

        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let result = sqlx::query(
            r#"
            UPDATE multimedia_links
            SET owner_id = $3, owner_kind = $4, file = $5, format = $6, title = $7
            WHERE id = $1 AND tree_id = $2
            "#,
        )
        .bind(entity.id.value())
        .bind(entity.tree_id.value())
        .bind(owner_id)
        .bind(owner_kind)
        .bind(&entity.file)
        .bind(&entity.format)
        .bind(&entity.title)
        .execute(&mut **tx)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("MultimediaLink", entity.id).into());
        }
        Ok(())
    }

    #[instrument(skip(self, entity), fields(id = %entity.id))]
    async fn delete(&self, entity: &MultimediaLink) -> Result<(), PortError> {
        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let result = sqlx::query("DELETE FROM multimedia_links WHERE id = $1 AND tree_id = $2")
            .bind(entity.id.value())
            .bind(entity.tree_id.value())
            .execute(&mut **tx)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("MultimediaLink", entity.id).into());
        }
        Ok(())
    }

    async fn find(&self, tree_id: TreeId, id: EntityId) -> Result<Option<MultimediaLink>, PortError> {
        let row = sqlx::query_as::<_, MultimediaLinkRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1 AND tree_id = $2"
        ))
        .bind(id.value())
        .bind(tree_id.value())
        .fetch_optional(self.session.pool())
        .await
        .map_err(DatabaseError::from)?;

        Ok(row.map(MultimediaLink::try_from).transpose()?)
    }

    async fn get_by_tree(&self, tree_id: TreeId) -> Result<Vec<MultimediaLink>, PortError> {
        let rows = sqlx::query_as::<_, MultimediaLinkRow>(&format!(
            "{SELECT_COLUMNS} WHERE tree_id = $1 ORDER BY id"
        ))
        .bind(tree_id.value())
        .fetch_all(self.session.pool())
        .await
        .map_err(DatabaseError::from)?;

        rows.into_iter()
            .map(|row| MultimediaLink::try_from(row).map_err(PortError::from))
            .collect()
    }
}
