pub mod catalog;
pub mod config;
pub mod dao;
pub mod db;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod subscription;
pub mod time_utils;

#[cfg(test)]
mod test_utils;

pub use catalog::{CatalogClient, CatalogError, Exercise, ExercisePage, ExerciseSource};
pub use config::{AppConfig, ConfigError};
pub use db::{AppState, Database, StoreError};
pub use pagination::PaginationCursor;
pub use subscription::Subscription;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Entry point for the mobile shell: logging, configuration, database.
pub async fn start() -> Result<AppState, StartupError> {
  logging::init_tracing();

  let config = AppConfig::from_env()?;
  let state = AppState::initialize(config).await?;

  tracing::info!(
    catalog = state.catalog.base_url(),
    page_size = state.config.page_size,
    "Fitness tracker storage ready"
  );
  Ok(state)
}
