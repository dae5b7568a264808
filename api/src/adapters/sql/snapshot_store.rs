//! SQL adapter for SnapshotStore

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema, Set};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::entities::{Order, Product};
use crate::domain::ports::{SnapshotStore, ORDERS_KEY, PRODUCTS_KEY};
use crate::entity::snapshots;
use crate::error::DomainError;

/// SeaORM implementation of SnapshotStore
pub struct SqlSnapshotStore {
    db: DatabaseConnection,
}

impl SqlSnapshotStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `snapshots` table if it doesn't exist yet
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let backend = self.db.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(snapshots::Entity);
        stmt.if_not_exists();

        self.db
            .execute(backend.build(&stmt))
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, DomainError> {
        let row = snapshots::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        match row {
            None => Ok(Vec::new()),
            Some(row) => serde_json::from_str(&row.payload)
                .map_err(|e| DomainError::Storage(format!("Corrupt blob under {}: {}", key, e))),
        }
    }

    async fn save<T: Serialize>(&self, key: &str, values: &[T]) -> Result<(), DomainError> {
        let payload =
            serde_json::to_string(values).map_err(|e| DomainError::Internal(e.to_string()))?;

        let model = snapshots::ActiveModel {
            key: Set(key.to_string()),
            payload: Set(payload),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        snapshots::Entity::insert(model)
            .on_conflict(
                OnConflict::column(snapshots::Column::Key)
                    .update_columns([snapshots::Column::Payload, snapshots::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for SqlSnapshotStore {
    async fn load_products(&self) -> Result<Vec<Product>, DomainError> {
        self.load(PRODUCTS_KEY).await
    }

    async fn load_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.load(ORDERS_KEY).await
    }

    async fn save_products(&self, products: &[Product]) -> Result<(), DomainError> {
        self.save(PRODUCTS_KEY, products).await
    }

    async fn save_orders(&self, orders: &[Order]) -> Result<(), DomainError> {
        self.save(ORDERS_KEY, orders).await
    }
}
