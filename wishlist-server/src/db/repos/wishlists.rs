//! Wishlist repository on PostgreSQL
//!
//! PostgreSQL is used as a document store: each row holds one wishlist
//! with its items embedded as a JSONB array.
//! - `id` is NOT unique; "first match" means lowest `pk`
//! - append: single-row `items || jsonb` update (no lost appends)
//! - search: unnest items with ordinality, filter on category

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tokio::sync::OnceCell;

use crate::db::{DbError, WishlistStore};
use crate::models::{slugify, CategoryMatch, Item, Wishlist};

/// Wishlist document as stored
#[derive(Debug, FromRow)]
struct WishlistRow {
    id: String,
    title: String,
    description: String,
    items: Json<Vec<Item>>,
    created_at: DateTime<Utc>,
}

impl From<WishlistRow> for Wishlist {
    fn from(row: WishlistRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            items: row.items.0,
            created_at: row.created_at,
        }
    }
}

/// Create the wishlists collection if it doesn't exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring wishlists table exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS wishlists (
            pk BIGSERIAL PRIMARY KEY,
            id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            items JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_wishlists_id ON wishlists(id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_wishlists_title ON wishlists(title)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Wishlist store backed by a lazily connected pool
pub struct PgWishlistStore {
    pool: PgPool,
    schema: OnceCell<()>,
}

impl PgWishlistStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    /// Pool handle, creating the table on first use.
    async fn pool(&self) -> Result<&PgPool, DbError> {
        self.schema
            .get_or_try_init(|| ensure_schema(&self.pool))
            .await?;
        Ok(&self.pool)
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Wishlist>, DbError> {
        // column is one of two fixed names, never user input
        let sql = format!(
            r#"
            SELECT id, title, description, items, created_at
            FROM wishlists
            WHERE {} = $1
            ORDER BY pk
            LIMIT 1
            "#,
            column
        );

        let row: Option<WishlistRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(self.pool().await?)
            .await?;

        Ok(row.map(Wishlist::from))
    }
}

#[async_trait]
impl WishlistStore for PgWishlistStore {
    async fn create(&self, title: &str, description: &str) -> Result<Wishlist, DbError> {
        let row: WishlistRow = sqlx::query_as(
            r#"
            INSERT INTO wishlists (id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, items, created_at
            "#,
        )
        .bind(slugify(title))
        .bind(title)
        .bind(description)
        .fetch_one(self.pool().await?)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Wishlist, DbError> {
        self.find_one("id", id)
            .await?
            .ok_or_else(|| DbError::wishlist_not_found(id))
    }

    async fn find_by_title(&self, title: &str) -> Result<Wishlist, DbError> {
        self.find_one("title", title)
            .await?
            .ok_or_else(|| DbError::wishlist_not_found(title))
    }

    async fn append_item(&self, id: &str, item: Item) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE wishlists
            SET items = items || jsonb_build_array($2::jsonb)
            WHERE pk = (SELECT pk FROM wishlists WHERE id = $1 ORDER BY pk LIMIT 1)
            "#,
        )
        .bind(id)
        .bind(Json(&item))
        .execute(self.pool().await?)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::wishlist_not_found(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM wishlists
            WHERE pk = (SELECT pk FROM wishlists WHERE id = $1 ORDER BY pk LIMIT 1)
            "#,
        )
        .bind(id)
        .execute(self.pool().await?)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::wishlist_not_found(id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM wishlists")
            .execute(self.pool().await?)
            .await?;
        Ok(result.rows_affected())
    }

    async fn search_by_category(&self, category: &str) -> Result<Vec<CategoryMatch>, DbError> {
        let rows: Vec<(String, Json<Item>)> = sqlx::query_as(
            r#"
            SELECT w.title, e.item
            FROM wishlists w
            CROSS JOIN LATERAL jsonb_array_elements(w.items) WITH ORDINALITY AS e(item, idx)
            WHERE e.item->>'category' = $1
            ORDER BY w.pk, e.idx
            "#,
        )
        .bind(category)
        .fetch_all(self.pool().await?)
        .await?;

        Ok(rows
            .iter()
            .map(|(title, item)| CategoryMatch::new(title, &item.0))
            .collect())
    }
}
