use serde::{Deserialize, Serialize};

/// A calendar entry. Times are epoch milliseconds; `start_time <= end_time`
/// is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FitnessEvent {
  pub id: i64,
  pub title: String,
  pub start_time: i64,
  pub end_time: i64,
  pub description: Option<String>,
  /// Identifier of the mirrored entry in the device calendar, if any
  pub system_calendar_event_id: Option<i64>,
}

/// For inserting new events (id is assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFitnessEvent {
  pub title: String,
  pub start_time: i64,
  pub end_time: i64,
  pub description: Option<String>,
  pub system_calendar_event_id: Option<i64>,
}

impl NewFitnessEvent {
  pub fn new(title: impl Into<String>, start_time: i64, end_time: i64) -> Self {
    Self {
      title: title.into(),
      start_time,
      end_time,
      description: None,
      system_calendar_event_id: None,
    }
  }
}
