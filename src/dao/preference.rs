//! Key-value preferences (accessibility toggles, last-selected tabs, ...).

use crate::db::{Database, DbPool, StoreError, Table};
use crate::subscription::Subscription;

pub const HIGH_CONTRAST: &str = "accessibility.high_contrast";
pub const LARGE_TEXT: &str = "accessibility.large_text";
pub const REDUCE_MOTION: &str = "accessibility.reduce_motion";

#[derive(Debug, Clone)]
pub struct PreferenceDao {
  db: Database,
}

impl PreferenceDao {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    fetch_value(&self.db.pool, key).await
  }

  pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let result = sqlx::query(
      r#"
      INSERT INTO preferences (key, value)
      VALUES (?1, ?2)
      ON CONFLICT(key) DO UPDATE SET value = excluded.value
      "#,
    )
    .bind(key)
    .bind(value)
    .execute(&self.db.pool)
    .await?;

    tracing::debug!(key, "Saved preference");
    self.db.committed(Table::Preferences, result.rows_affected());
    Ok(())
  }

  pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM preferences WHERE key = ?1")
      .bind(key)
      .execute(&self.db.pool)
      .await?;

    self.db.committed(Table::Preferences, result.rows_affected());
    Ok(())
  }

  /// Missing or unparsable values fall back to `default`.
  pub async fn get_bool(&self, key: &str, default: bool) -> Result<bool, StoreError> {
    let value = self.get(key).await?;
    Ok(value.and_then(|v| v.parse().ok()).unwrap_or(default))
  }

  pub async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
    self.set(key, if value { "true" } else { "false" }).await
  }

  pub fn observe(&self, key: &str) -> Subscription<Option<String>> {
    let pool = self.db.pool.clone();
    let key = key.to_string();
    Subscription::spawn("preference", self.db.changes.watch(Table::Preferences), move || {
      let pool = pool.clone();
      let key = key.clone();
      async move { fetch_value(&pool, &key).await }
    })
  }
}

async fn fetch_value(pool: &DbPool, key: &str) -> Result<Option<String>, StoreError> {
  let value = sqlx::query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?1")
    .bind(key)
    .fetch_optional(pool)
    .await?;
  Ok(value)
}
