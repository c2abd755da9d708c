//! PostgreSQL-backed [`ItemStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use lendhub_core::error::CoreError;
use lendhub_core::item::{Item, ItemPatch, NewItem};
use lendhub_core::store::ItemStore;
use lendhub_core::types::DbId;

use crate::models::item::ItemRow;
use crate::repositories::map_sqlx_err;

/// Column list for `items` queries.
const ITEM_COLUMNS: &str = "id, name, description, available, owner_id";

pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn create(&self, owner_id: DbId, item: NewItem) -> Result<Item, CoreError> {
        let query = format!(
            "INSERT INTO items (name, description, available, owner_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {ITEM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ItemRow>(&query)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.available)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, CoreError> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        let row = sqlx::query_as::<_, ItemRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: DbId) -> Result<Vec<Item>, CoreError> {
        let query =
            format!("SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = $1 ORDER BY id ASC");
        let rows = sqlx::query_as::<_, ItemRow>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Item>, CoreError> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id ASC");
        let rows = sqlx::query_as::<_, ItemRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: DbId, patch: ItemPatch) -> Result<Option<Item>, CoreError> {
        let query = format!(
            "UPDATE items
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 available = COALESCE($4, available)
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ItemRow>(&query)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.available)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        // Bookings reference the item with ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
