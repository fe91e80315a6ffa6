use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Profile keyed by the external auth provider's uid. At most one row per uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub firebase_uid: String,
  pub name: String,
  pub email: String,
  pub avatar_uri: Option<String>,
  /// Centimetres
  pub height: f64,
  /// Kilograms
  pub weight: f64,
  pub fitness_goal: String,
  pub workout_frequency: String,
  pub fitness_tags: Vec<String>,
}

impl User {
  /// Minimal profile created right after the first successful sign-in.
  pub fn new(firebase_uid: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      firebase_uid: firebase_uid.into(),
      name: name.into(),
      email: email.into(),
      avatar_uri: None,
      height: 0.0,
      weight: 0.0,
      fitness_goal: String::new(),
      workout_frequency: String::new(),
      fitness_tags: Vec::new(),
    }
  }
}

/// Tags are stored as one comma-joined column.
pub fn join_tags(tags: &[String]) -> String {
  tags
    .iter()
    .map(|t| t.trim())
    .filter(|t| !t.is_empty())
    .collect::<Vec<_>>()
    .join(",")
}

pub fn split_tags(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(String::from)
    .collect()
}

impl<'r> FromRow<'r, SqliteRow> for User {
  fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
    let tags: String = row.try_get("fitness_tags")?;
    Ok(Self {
      firebase_uid: row.try_get("firebase_uid")?,
      name: row.try_get("name")?,
      email: row.try_get("email")?,
      avatar_uri: row.try_get("avatar_uri")?,
      height: row.try_get("height")?,
      weight: row.try_get("weight")?,
      fitness_goal: row.try_get("fitness_goal")?,
      workout_frequency: row.try_get("workout_frequency")?,
      fitness_tags: split_tags(&tags),
    })
  }
}
