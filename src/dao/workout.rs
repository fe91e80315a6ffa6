use crate::db::{Database, DbPool, StoreError, Table};
use crate::models::{NewWorkout, Workout};
use crate::subscription::Subscription;

#[derive(Debug, Clone)]
pub struct WorkoutDao {
  db: Database,
}

impl WorkoutDao {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  /// Store a new workout. The id is generated by the store and never reused.
  pub async fn insert(&self, workout: &NewWorkout) -> Result<(), StoreError> {
    let result = sqlx::query(
      r#"
      INSERT INTO workout_table (
        firebase_uid, type, duration, calories, intensity, notes, date, time
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
      "#,
    )
    .bind(&workout.firebase_uid)
    .bind(&workout.workout_type)
    .bind(workout.duration)
    .bind(workout.calories)
    .bind(&workout.intensity)
    .bind(&workout.notes)
    .bind(&workout.date)
    .bind(&workout.time)
    .execute(&self.db.pool)
    .await?;

    tracing::debug!(
      id = result.last_insert_rowid(),
      firebase_uid = %workout.firebase_uid,
      "Inserted workout"
    );
    self.db.committed(Table::Workouts, result.rows_affected());
    Ok(())
  }

  /// Replace every field of the row with `workout.id`. Missing ids are a silent no-op.
  pub async fn update(&self, workout: &Workout) -> Result<(), StoreError> {
    let result = sqlx::query(
      r#"
      UPDATE workout_table
      SET firebase_uid = ?1,
          type = ?2,
          duration = ?3,
          calories = ?4,
          intensity = ?5,
          notes = ?6,
          date = ?7,
          time = ?8
      WHERE id = ?9
      "#,
    )
    .bind(&workout.firebase_uid)
    .bind(&workout.workout_type)
    .bind(workout.duration)
    .bind(workout.calories)
    .bind(&workout.intensity)
    .bind(&workout.notes)
    .bind(&workout.date)
    .bind(&workout.time)
    .bind(workout.id)
    .execute(&self.db.pool)
    .await?;

    if result.rows_affected() == 0 {
      tracing::debug!(id = workout.id, "Update matched no workout");
    }
    self.db.committed(Table::Workouts, result.rows_affected());
    Ok(())
  }

  pub async fn delete(&self, workout: &Workout) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM workout_table WHERE id = ?1")
      .bind(workout.id)
      .execute(&self.db.pool)
      .await?;

    tracing::debug!(id = workout.id, rows = result.rows_affected(), "Deleted workout");
    self.db.committed(Table::Workouts, result.rows_affected());
    Ok(())
  }

  pub async fn get_by_id(&self, id: i64) -> Result<Option<Workout>, StoreError> {
    let workout = sqlx::query_as::<_, Workout>("SELECT * FROM workout_table WHERE id = ?1")
      .bind(id)
      .fetch_optional(&self.db.pool)
      .await?;
    Ok(workout)
  }

  /// All workouts, most recently logged first.
  pub async fn get_all(&self) -> Result<Vec<Workout>, StoreError> {
    fetch_all(&self.db.pool).await
  }

  pub async fn get_for_user(&self, firebase_uid: &str) -> Result<Vec<Workout>, StoreError> {
    fetch_for_user(&self.db.pool, firebase_uid).await
  }

  pub fn observe_all(&self) -> Subscription<Vec<Workout>> {
    let pool = self.db.pool.clone();
    Subscription::spawn("all_workouts", self.db.changes.watch(Table::Workouts), move || {
      let pool = pool.clone();
      async move { fetch_all(&pool).await }
    })
  }

  pub fn observe_for_user(&self, firebase_uid: &str) -> Subscription<Vec<Workout>> {
    let pool = self.db.pool.clone();
    let uid = firebase_uid.to_string();
    Subscription::spawn("workouts_for_user", self.db.changes.watch(Table::Workouts), move || {
      let pool = pool.clone();
      let uid = uid.clone();
      async move { fetch_for_user(&pool, &uid).await }
    })
  }
}

async fn fetch_all(pool: &DbPool) -> Result<Vec<Workout>, StoreError> {
  let workouts = sqlx::query_as::<_, Workout>("SELECT * FROM workout_table ORDER BY id DESC")
    .fetch_all(pool)
    .await?;
  Ok(workouts)
}

async fn fetch_for_user(pool: &DbPool, firebase_uid: &str) -> Result<Vec<Workout>, StoreError> {
  let workouts = sqlx::query_as::<_, Workout>(
    "SELECT * FROM workout_table WHERE firebase_uid = ?1 ORDER BY id DESC",
  )
  .bind(firebase_uid)
  .fetch_all(pool)
  .await?;
  Ok(workouts)
}
