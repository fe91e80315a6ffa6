use serde::{Deserialize, Serialize};

/// A logged workout. `firebase_uid` points at the owning [`super::User`] but is
/// never checked against the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
  pub id: i64,
  pub firebase_uid: String,
  #[serde(rename = "type")]
  #[sqlx(rename = "type")]
  pub workout_type: String,
  /// Minutes
  pub duration: i64,
  pub calories: i64,
  pub intensity: String,
  pub notes: String,
  /// Calendar date as entered, e.g. "2025-03-14"
  pub date: String,
  /// Clock time as entered, e.g. "07:30"
  pub time: String,
}

/// For inserting new workouts (id is assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
  pub firebase_uid: String,
  #[serde(rename = "type")]
  pub workout_type: String,
  pub duration: i64,
  pub calories: i64,
  pub intensity: String,
  pub notes: String,
  pub date: String,
  pub time: String,
}
