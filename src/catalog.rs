//! Remote exercise catalog client.
//!
//! Fetches one page of exercises at a time. Stateless: no retry, no caching.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const EXERCISE_API_BASE: &str = "https://exercisedb-api.vercel.app/api/v1";
const EXERCISES_PATH: &str = "exercises";
const ERROR_BODY_PREVIEW_CHARS: usize = 500;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("Invalid catalog URL: {0}")]
  InvalidUrl(String),

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Catalog returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Failed to parse exercise page: {0}")]
  Decode(String),
}

/// ---------------------------------------------------------------------------
/// Catalog Data Structures
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
  #[serde(rename = "exerciseId", alias = "id")]
  pub id: String,
  pub name: String,
  /// Animated demonstration
  #[serde(default)]
  pub gif_url: Option<String>,
  #[serde(default)]
  pub target_muscles: Vec<String>,
  #[serde(default)]
  pub body_parts: Vec<String>,
  #[serde(default)]
  pub equipments: Vec<String>,
  #[serde(default)]
  pub secondary_muscles: Vec<String>,
  /// Ordered steps
  #[serde(default)]
  pub instructions: Vec<String>,
}

/// What the cursor consumes from one response.
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePage {
  pub exercises: Vec<Exercise>,
  pub total: u32,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
  data: CatalogPageData,
}

/// Paging links and page counts in the payload are ignored; the cursor
/// derives them from the total.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogPageData {
  total_exercises: u32,
  #[serde(default)]
  exercises: Vec<Exercise>,
}

/// ---------------------------------------------------------------------------
/// Exercise Source
/// ---------------------------------------------------------------------------

/// Anything that can serve a page of the exercise catalog.
#[async_trait]
pub trait ExerciseSource: Send + Sync {
  async fn fetch_page(&self, limit: u32, offset: u32) -> Result<ExercisePage, CatalogError>;
}

/// ---------------------------------------------------------------------------
/// HTTP Client
/// ---------------------------------------------------------------------------

/// HTTP client for the catalog. Construct one at startup and hand it to
/// whoever needs it; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
  http: Client,
  base_url: String,
}

impl CatalogClient {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_http(Client::new(), base_url)
  }

  pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
    Self {
      http,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn page_url(&self, limit: u32, offset: u32) -> Result<Url, CatalogError> {
    let mut url = Url::parse(&format!("{}/{}", self.base_url, EXERCISES_PATH))
      .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

    url
      .query_pairs_mut()
      .append_pair("limit", &limit.to_string())
      .append_pair("offset", &offset.to_string());

    Ok(url)
  }
}

#[async_trait]
impl ExerciseSource for CatalogClient {
  async fn fetch_page(&self, limit: u32, offset: u32) -> Result<ExercisePage, CatalogError> {
    let url = self.page_url(limit, offset)?;

    tracing::debug!(limit, offset, "Fetching exercise page");

    let response = self.http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(CatalogError::Status {
        status: status.as_u16(),
        body: body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
      });
    }

    let response_text = response.text().await?;
    parse_page(&response_text)
  }
}

pub fn parse_page(body: &str) -> Result<ExercisePage, CatalogError> {
  let parsed: CatalogResponse = serde_json::from_str(body).map_err(|e| {
    tracing::warn!(
      error = %e,
      raw = %body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect::<String>(),
      "Failed to parse exercise page"
    );
    CatalogError::Decode(e.to_string())
  })?;

  Ok(ExercisePage {
    exercises: parsed.data.exercises,
    total: parsed.data.total_exercises,
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
