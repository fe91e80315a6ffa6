use crate::db::{Database, DbPool, StoreError, Table};
use crate::models::{FitnessEvent, NewFitnessEvent};
use crate::subscription::Subscription;

#[derive(Debug, Clone)]
pub struct FitnessEventDao {
  db: Database,
}

impl FitnessEventDao {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  /// Store a new event and return its generated id.
  pub async fn insert(&self, event: &NewFitnessEvent) -> Result<i64, StoreError> {
    let result = sqlx::query(
      r#"
      INSERT INTO fitness_events (
        title, start_time, end_time, description, system_calendar_event_id
      )
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
    )
    .bind(&event.title)
    .bind(event.start_time)
    .bind(event.end_time)
    .bind(&event.description)
    .bind(event.system_calendar_event_id)
    .execute(&self.db.pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, title = %event.title, "Inserted fitness event");
    self.db.committed(Table::FitnessEvents, result.rows_affected());
    Ok(id)
  }

  pub async fn update(&self, event: &FitnessEvent) -> Result<(), StoreError> {
    let result = sqlx::query(
      r#"
      UPDATE fitness_events
      SET title = ?1,
          start_time = ?2,
          end_time = ?3,
          description = ?4,
          system_calendar_event_id = ?5
      WHERE id = ?6
      "#,
    )
    .bind(&event.title)
    .bind(event.start_time)
    .bind(event.end_time)
    .bind(&event.description)
    .bind(event.system_calendar_event_id)
    .bind(event.id)
    .execute(&self.db.pool)
    .await?;

    if result.rows_affected() == 0 {
      tracing::debug!(id = event.id, "Update matched no fitness event");
    }
    self.db.committed(Table::FitnessEvents, result.rows_affected());
    Ok(())
  }

  pub async fn delete(&self, event: &FitnessEvent) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM fitness_events WHERE id = ?1")
      .bind(event.id)
      .execute(&self.db.pool)
      .await?;

    tracing::debug!(id = event.id, rows = result.rows_affected(), "Deleted fitness event");
    self.db.committed(Table::FitnessEvents, result.rows_affected());
    Ok(())
  }

  pub async fn get_by_id(&self, id: i64) -> Result<Option<FitnessEvent>, StoreError> {
    let event = sqlx::query_as::<_, FitnessEvent>("SELECT * FROM fitness_events WHERE id = ?1")
      .bind(id)
      .fetch_optional(&self.db.pool)
      .await?;
    Ok(event)
  }

  /// Every event, latest start first.
  pub async fn get_all(&self) -> Result<Vec<FitnessEvent>, StoreError> {
    fetch_all(&self.db.pool).await
  }

  /// Events starting in `[day_start, day_end)`, earliest first.
  pub async fn get_for_day(&self, day_start: i64, day_end: i64) -> Result<Vec<FitnessEvent>, StoreError> {
    fetch_for_day(&self.db.pool, day_start, day_end).await
  }

  pub fn observe_all(&self) -> Subscription<Vec<FitnessEvent>> {
    let pool = self.db.pool.clone();
    Subscription::spawn("all_events", self.db.changes.watch(Table::FitnessEvents), move || {
      let pool = pool.clone();
      async move { fetch_all(&pool).await }
    })
  }

  pub fn observe_for_day(&self, day_start: i64, day_end: i64) -> Subscription<Vec<FitnessEvent>> {
    let pool = self.db.pool.clone();
    Subscription::spawn("events_for_day", self.db.changes.watch(Table::FitnessEvents), move || {
      let pool = pool.clone();
      async move { fetch_for_day(&pool, day_start, day_end).await }
    })
  }
}

async fn fetch_all(pool: &DbPool) -> Result<Vec<FitnessEvent>, StoreError> {
  let events = sqlx::query_as::<_, FitnessEvent>(
    "SELECT * FROM fitness_events ORDER BY start_time DESC, id DESC",
  )
  .fetch_all(pool)
  .await?;
  Ok(events)
}

async fn fetch_for_day(pool: &DbPool, day_start: i64, day_end: i64) -> Result<Vec<FitnessEvent>, StoreError> {
  let events = sqlx::query_as::<_, FitnessEvent>(
    r#"
    SELECT * FROM fitness_events
    WHERE start_time >= ?1 AND start_time < ?2
    ORDER BY start_time ASC, id ASC
    "#,
  )
  .bind(day_start)
  .bind(day_end)
  .fetch_all(pool)
  .await?;
  Ok(events)
}
