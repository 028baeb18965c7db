//! Family repository implementation
//!
//! A family row keeps its spouses as nullable columns and its children as a
//! `BIGINT[]` in birth order, so one row round-trips one [`Family`].

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{debug, instrument};

use core_kernel::{EntityId, PortError, Repository, TreeId};
use domain_tree::Family;

use crate::error::DatabaseError;
use crate::session::PgSession;

/// Database row for a family
#[derive(Debug, Clone, FromRow)]
pub struct FamilyRow {
    pub id: i64,
    pub tree_id: i64,
    pub husband_id: Option<i64>,
    pub wife_id: Option<i64>,
    pub child_ids: Vec<i64>,
}

impl From<FamilyRow> for Family {
    fn from(row: FamilyRow) -> Self {
        Family {
            id: EntityId::new(row.id),
            tree_id: TreeId::new(row.tree_id),
            husband_id: row.husband_id.map(EntityId::new),
            wife_id: row.wife_id.map(EntityId::new),
            child_ids: row.child_ids.into_iter().map(EntityId::new).collect(),
        }
    }
}

fn child_column(family: &Family) -> Vec<i64> {
    family.child_ids.iter().map(|id| id.value()).collect()
}

/// Repository for families
#[derive(Debug, Clone)]
pub struct FamilyRepository {
    session: Arc<PgSession>,
}

impl FamilyRepository {
    pub fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<Family> for FamilyRepository {
    #[instrument(skip(self, entity), fields(tree = %entity.tree_id))]
    async fn add(&self, mut entity: Family) -> Result<Family, PortError> {
        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO families (tree_id, husband_id, wife_id, child_ids)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(entity.tree_id.value())
        .bind(entity.husband_id.map(|id| id.value()))
        .bind(entity.wife_id.map(|id| id.value()))
        .bind(child_column(&entity))
        .fetch_one(&mut **tx)
        .await
        .map_err(DatabaseError::from)?;

        entity.id = EntityId::new(id);
        debug!(id = %entity.id, children = entity.child_ids.len(), "Inserted family");
        Ok(entity)
    }

    #[instrument(skip(self, entity), fields(id = %entity.id))]
    async fn update(&self, entity: &Family) -> Result<(), PortError> {
        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let result = sqlx::query(
            r#"
            UPDATE families
            SET husband_id = $3, wife_id = $4, child_ids = $5
            WHERE id = $1 AND tree_id = $2
            "#,
        )
        .bind(entity.id.value())
        .bind(entity.tree_id.value())
        .bind(entity.husband_id.map(|id| id.value()))
        .bind(entity.wife_id.map(|id| id.value()))
        .bind(child_column(entity))
        .execute(&mut **tx)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Family", entity.id).into());
        }
        Ok(())
    }

    #[instrument(skip(self, entity), fields(id = %entity.id))]
    async fn delete(&self, entity: &Family) -> Result<(), PortError> {
        let mut slot = self.session.lock().await;
        let tx = self.session.begin(&mut slot).await?;
        let result = sqlx::query("DELETE FROM families WHERE id = $1 AND tree_id = $2")
            .bind(entity.id.value())
            .bind(entity.tree_id.value())
            .execute(&mut **tx)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Family", entity.id).into());
        }
        Ok(())
    }

    async fn find(&self, tree_id: TreeId, id: EntityId) -> Result<Option<Family>, PortError> {
        let row = sqlx::query_as::<_, FamilyRow>(
            r#"
            SELECT id, tree_id, husband_id, wife_id, child_ids
            FROM families
            WHERE id = $1 AND tree_id = $2
            "#,
        )
        .bind(id.value())
        .bind(tree_id.value())
        .fetch_optional(self.session.pool())
        .await
        .map_err(DatabaseError::from)?;

        Ok(row.map(Family::from))
    }

    async fn get_by_tree(&self, tree_id: TreeId) -> Result<Vec<Family>, PortError> {
        let rows = sqlx::query_as::<_, FamilyRow>(
            r#"
            SELECT id, tree_id, husband_id, wife_id, child_ids
            FROM families
            WHERE tree_id = $1
            ORDER BY id
            "#,
        )
        .bind(tree_id.value())
        .fetch_all(self.session.pool())
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(Family::from).collect())
    }
}
