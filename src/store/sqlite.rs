//! SQLite repository / SQLite 物品仓库
//!
//! - `seq` (AUTOINCREMENT) carries insertion order, `id` stays an opaque UUID
//! - tags are a JSON array in a TEXT column
//! - WAL journal with synchronous=FULL so a returned `put` survives power loss

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

use super::ItemRepository;
use crate::error::{CatalogError, Result};
use crate::models::Item;

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: String,
    category: String,
    location: String,
    image: Option<String>,
    tags: String,
    created_at: String,
}

impl TryFrom<ItemRow> for Item {
    type Error = CatalogError;

    fn try_from(row: ItemRow) -> Result<Self> {
        let tags: Vec<String> = serde_json::from_str(&row.tags)?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| {
                CatalogError::StorageUnavailable(format!("corrupt timestamp on item {}: {}", row.id, e))
            })?
            .with_timezone(&Utc);

        Ok(Item {
            id: row.id,
            name: row.name,
            category: row.category,
            location: row.location,
            image: row.image,
            tags,
            created_at,
        })
    }
}

/// SQLite-backed `ItemRepository`
pub struct SqliteItemRepository {
    db: Pool<Sqlite>,
}

impl SqliteItemRepository {
    /// Open (and create if needed) the database at `url`.
    ///
    /// In-memory URLs get exactly one connection that never expires; every
    /// extra connection would see its own empty database.
    pub async fn connect(url: &str) -> Result<Self> {
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(10))
            .synchronous(SqliteSynchronous::Full);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        let db = pool_options.connect_with(options).await?;
        tracing::info!("Item database opened: {}", url);

        Ok(Self { db })
    }

    /// Create the items table / 建表
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL CHECK (length(trim(name)) > 0),
                category TEXT NOT NULL CHECK (length(trim(category)) > 0),
                location TEXT NOT NULL CHECK (length(trim(location)) > 0),
                image TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn put(&self, item: Item) -> Result<Item> {
        let tags = serde_json::to_string(&item.tags)
            .map_err(|e| CatalogError::StorageUnavailable(e.to_string()))?;

        sqlx::query(
            "INSERT INTO items (id, name, category, location, image, tags, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.location)
        .bind(&item.image)
        .bind(&tags)
        .bind(item.created_at.to_rfc3339())
        .execute(&self.db)
        .await?;

        Ok(item)
    }

    async fn get_all(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, category, location, image, tags, created_at FROM items ORDER BY seq ASC",
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Item::try_from).collect()
    }
}
