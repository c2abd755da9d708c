use lendhub_core::item::Item;
use sqlx::FromRow;

use lendhub_core::types::DbId;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: DbId,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            description: row.description,
            available: row.available,
            owner_id: row.owner_id,
        }
    }
}
