//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - In-memory database setup/teardown
//! - Mock data factories
//! - A scripted exercise catalog

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::{CatalogError, Exercise, ExercisePage, ExerciseSource};
use crate::db::Database;
use crate::models::{NewWorkout, User};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database with all migrations applied.
///
/// `Database::connect` caps in-memory pools at one connection; a second
/// connection would open a separate, empty database.
pub async fn setup_test_db() -> Database {
  Database::connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database")
}

/// Close a test database
pub async fn teardown_test_db(db: Database) {
  db.close().await;
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_user(firebase_uid: &str) -> User {
  User {
    firebase_uid: firebase_uid.to_string(),
    name: "Test Athlete".to_string(),
    email: format!("{}@example.com", firebase_uid),
    avatar_uri: Some("content://avatars/1".to_string()),
    height: 175.0,
    weight: 70.5,
    fitness_goal: "Build endurance".to_string(),
    workout_frequency: "3-4 times a week".to_string(),
    fitness_tags: vec!["cardio".to_string(), "strength".to_string()],
  }
}

/// Alternates Run/Ride like a typical training week
pub fn mock_new_workout(firebase_uid: &str, i: usize) -> NewWorkout {
  let workout_type = if i % 2 == 0 { "Run" } else { "Ride" };
  NewWorkout {
    firebase_uid: firebase_uid.to_string(),
    workout_type: workout_type.to_string(),
    duration: 30 + (i as i64 % 4) * 15,
    calories: 300 + i as i64 * 10,
    intensity: "Moderate".to_string(),
    notes: String::new(),
    date: format!("2025-03-{:02}", 1 + i % 28),
    time: "07:30".to_string(),
  }
}

pub fn mock_exercise(index: u32) -> Exercise {
  Exercise {
    id: format!("ex-{}", index),
    name: format!("Exercise {}", index),
    gif_url: Some(format!("https://cdn.example.com/{}.gif", index)),
    target_muscles: vec!["quads".to_string()],
    body_parts: vec!["upper legs".to_string()],
    equipments: vec!["body weight".to_string()],
    secondary_muscles: vec!["glutes".to_string()],
    instructions: vec!["Stand tall.".to_string(), "Squat down.".to_string()],
  }
}

/// JSON body shaped like the catalog's `/exercises` response.
pub fn catalog_body(offset: u32, count: u32, total: u32) -> String {
  let exercises: Vec<Exercise> = (offset..offset + count).map(mock_exercise).collect();
  serde_json::json!({
    "success": true,
    "data": {
      "previousPage": null,
      "nextPage": null,
      "totalPages": total.div_ceil(count.max(1)),
      "totalExercises": total,
      "exercises": exercises,
    }
  })
  .to_string()
}

/// ---------------------------------------------------------------------------
/// Fake Catalog
/// ---------------------------------------------------------------------------

/// In-memory catalog of `total` exercises that records every request and can
/// be told to fail or stall the next one.
pub struct FakeCatalog {
  total: u32,
  fail_next: AtomicBool,
  hang_next: AtomicBool,
  requests: Mutex<Vec<(u32, u32)>>,
}

impl FakeCatalog {
  pub fn new(total: u32) -> Self {
    Self {
      total,
      fail_next: AtomicBool::new(false),
      hang_next: AtomicBool::new(false),
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn fail_next(&self) {
    self.fail_next.store(true, Ordering::SeqCst);
  }

  /// The next request never completes
  pub fn hang_next(&self) {
    self.hang_next.store(true, Ordering::SeqCst);
  }

  /// `(limit, offset)` of every request so far
  pub fn requests(&self) -> Vec<(u32, u32)> {
    self.requests.lock().unwrap().clone()
  }
}

#[async_trait]
impl ExerciseSource for FakeCatalog {
  async fn fetch_page(&self, limit: u32, offset: u32) -> Result<ExercisePage, CatalogError> {
    self.requests.lock().unwrap().push((limit, offset));

    if self.fail_next.swap(false, Ordering::SeqCst) {
      return Err(CatalogError::Decode("scripted failure".to_string()));
    }

    if self.hang_next.swap(false, Ordering::SeqCst) {
      std::future::pending::<()>().await;
    }

    let end = offset.saturating_add(limit).min(self.total);
    Ok(ExercisePage {
      exercises: (offset.min(end)..end).map(mock_exercise).collect(),
      total: self.total,
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let db = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('users', 'workout_table', 'fitness_events', 'preferences')"
    )
    .fetch_all(&db.pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {:?}", tables);

    teardown_test_db(db).await;
  }

  #[tokio::test]
  async fn test_fake_catalog_serves_partial_last_page() {
    let catalog = FakeCatalog::new(23);
    let page = catalog.fetch_page(10, 20).await.unwrap();

    assert_eq!(page.exercises.len(), 3);
    assert_eq!(page.exercises[0].id, "ex-20");
    assert_eq!(catalog.requests(), vec![(10, 20)]);
  }
}
