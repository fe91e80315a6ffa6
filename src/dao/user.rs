use crate::db::{Database, StoreError, Table};
use crate::models::user::join_tags;
use crate::models::User;
use crate::subscription::Subscription;

#[derive(Debug, Clone)]
pub struct UserDao {
  db: Database,
}

impl UserDao {
  pub fn new(db: Database) -> Self {
    Self { db }
  }

  /// Insert or replace the profile stored under `user.firebase_uid`.
  pub async fn insert(&self, user: &User) -> Result<(), StoreError> {
    let result = sqlx::query(
      r#"
      INSERT INTO users (
        firebase_uid, name, email, avatar_uri, height, weight,
        fitness_goal, workout_frequency, fitness_tags
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
      ON CONFLICT(firebase_uid) DO UPDATE SET
        name = excluded.name,
        email = excluded.email,
        avatar_uri = excluded.avatar_uri,
        height = excluded.height,
        weight = excluded.weight,
        fitness_goal = excluded.fitness_goal,
        workout_frequency = excluded.workout_frequency,
        fitness_tags = excluded.fitness_tags
      "#,
    )
    .bind(&user.firebase_uid)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.avatar_uri)
    .bind(user.height)
    .bind(user.weight)
    .bind(&user.fitness_goal)
    .bind(&user.workout_frequency)
    .bind(join_tags(&user.fitness_tags))
    .execute(&self.db.pool)
    .await?;

    tracing::debug!(firebase_uid = %user.firebase_uid, "Upserted user");
    self.db.committed(Table::Users, result.rows_affected());
    Ok(())
  }

  /// Overwrite the mutable profile fields. Unknown uids are a silent no-op.
  pub async fn update(&self, user: &User) -> Result<(), StoreError> {
    let result = sqlx::query(
      r#"
      UPDATE users
      SET name = ?1,
          email = ?2,
          avatar_uri = ?3,
          height = ?4,
          weight = ?5,
          fitness_goal = ?6,
          workout_frequency = ?7,
          fitness_tags = ?8
      WHERE firebase_uid = ?9
      "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.avatar_uri)
    .bind(user.height)
    .bind(user.weight)
    .bind(&user.fitness_goal)
    .bind(&user.workout_frequency)
    .bind(join_tags(&user.fitness_tags))
    .bind(&user.firebase_uid)
    .execute(&self.db.pool)
    .await?;

    if result.rows_affected() == 0 {
      tracing::debug!(firebase_uid = %user.firebase_uid, "Update matched no user");
    }
    self.db.committed(Table::Users, result.rows_affected());
    Ok(())
  }

  pub async fn get_by_id(&self, firebase_uid: &str) -> Result<Option<User>, StoreError> {
    fetch_user(&self.db.pool, firebase_uid).await
  }

  /// Follow one profile; emits `None` while no row exists for the uid.
  pub fn observe(&self, firebase_uid: &str) -> Subscription<Option<User>> {
    let pool = self.db.pool.clone();
    let uid = firebase_uid.to_string();
    Subscription::spawn("user_by_id", self.db.changes.watch(Table::Users), move || {
      let pool = pool.clone();
      let uid = uid.clone();
      async move { fetch_user(&pool, &uid).await }
    })
  }
}

async fn fetch_user(pool: &crate::db::DbPool, firebase_uid: &str) -> Result<Option<User>, StoreError> {
  let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE firebase_uid = ?1")
    .bind(firebase_uid)
    .fetch_optional(pool)
    .await?;
  Ok(user)
}
