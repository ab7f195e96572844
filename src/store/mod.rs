//! Item store - validated create/read over a persistence collaborator / 物品存储
//!
//! `ItemStore` validates drafts, assigns ids and timestamps, and delegates the
//! actual write to an `ItemRepository`. Repository failures come back as
//! `CatalogError::StorageUnavailable`; validation failures never reach it.

pub mod sqlite;

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Item, ItemDraft};

pub use sqlite::SqliteItemRepository;

/// Persistence collaborator / 持久化接口
///
/// `put` must not return `Ok` before the record is durable. `get_all` returns
/// records in insertion order.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn put(&self, item: Item) -> Result<Item>;

    async fn get_all(&self) -> Result<Vec<Item>>;
}

/// Item store / 物品存储
#[derive(Clone)]
pub struct ItemStore {
    repo: Arc<dyn ItemRepository>,
}

impl ItemStore {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    /// Validate, stamp and persist a draft / 校验并保存
    pub async fn create(&self, draft: ItemDraft) -> Result<Item> {
        draft.validate()?;

        let item = draft.into_item(Uuid::new_v4().to_string(), Utc::now());
        let id = item.id.clone();

        let committed = self.repo.put(item).await.map_err(|e| {
            tracing::error!("Failed to persist item {}: {}", id, e);
            e
        })?;

        tracing::info!("Item created: {} ({})", committed.name, committed.id);
        Ok(committed)
    }

    /// All items in insertion order / 获取全部物品
    pub async fn list_all(&self) -> Result<Vec<Item>> {
        self.repo.get_all().await
    }
}
