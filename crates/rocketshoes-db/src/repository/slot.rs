//! # Slot Repository
//!
//! Durable named string slots: the SQLite rendition of a browser's
//! key-value storage.
//!
//! ## Write Semantics
//! ```text
//! put("@RocketShoes:cart", "[...]")
//!      │
//!      ▼
//! INSERT ... ON CONFLICT(key) DO UPDATE   ← one statement, atomic
//!      │
//!      ▼
//! The slot holds either the old value or the new one, never a mix.
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for slot operations.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    /// Creates a new SlotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SlotRepository { pool }
    }

    /// Returns the value stored under `key`, or `None` if the slot is empty.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM storage_slots WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Slot read");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO storage_slots (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Slot written");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    const KEY: &str = "@RocketShoes:cart";

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn updated_at(db: &Database, key: &str) -> String {
        sqlx::query_scalar("SELECT updated_at FROM storage_slots WHERE key = ?")
            .bind(key)
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_slot_is_none() {
        let db = db().await;

        assert_eq!(db.slots().get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let db = db().await;
        let slots = db.slots();

        slots.put(KEY, r#"[{"id":1,"amount":2}]"#).await.unwrap();

        assert_eq!(
            slots.get(KEY).await.unwrap().as_deref(),
            Some(r#"[{"id":1,"amount":2}]"#)
        );
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let db = db().await;
        let slots = db.slots();

        slots.put(KEY, "[1]").await.unwrap();
        let first = updated_at(&db, KEY).await;

        slots.put(KEY, "[2]").await.unwrap();
        let second = updated_at(&db, KEY).await;

        assert_eq!(slots.get(KEY).await.unwrap().as_deref(), Some("[2]"));
        assert!(chrono::DateTime::parse_from_rfc3339(&second).unwrap()
            >= chrono::DateTime::parse_from_rfc3339(&first).unwrap());

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM storage_slots")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = db().await;
        let slots = db.slots();

        slots.put("b", "2").await.unwrap();
        slots.put("a", "1").await.unwrap();

        assert_eq!(slots.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(slots.get("b").await.unwrap().as_deref(), Some("2"));
    }
}
