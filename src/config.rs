use std::env;

use crate::catalog::EXERCISE_API_BASE;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_DATABASE_URL: &str = "sqlite://fitness-tracker.db?mode=rwc";

pub const DATABASE_URL_VAR: &str = "FITNESS_DATABASE_URL";
pub const CATALOG_BASE_URL_VAR: &str = "EXERCISE_API_BASE_URL";
pub const PAGE_SIZE_VAR: &str = "EXERCISE_PAGE_SIZE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value:?}")]
  Invalid { key: &'static str, value: String },
}

/// Settings the composition root needs to build the store and catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  pub database_url: String,
  pub catalog_base_url: String,
  pub page_size: u32,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      catalog_base_url: EXERCISE_API_BASE.to_string(),
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

impl AppConfig {
  /// Read overrides from the environment (and `.env` if present); anything
  /// unset keeps its default.
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    let defaults = Self::default();

    let page_size = match env::var(PAGE_SIZE_VAR) {
      Ok(raw) => match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => size,
        _ => {
          return Err(ConfigError::Invalid {
            key: PAGE_SIZE_VAR,
            value: raw,
          })
        }
      },
      Err(_) => defaults.page_size,
    };

    Ok(Self {
      database_url: env::var(DATABASE_URL_VAR).unwrap_or(defaults.database_url),
      catalog_base_url: env::var(CATALOG_BASE_URL_VAR).unwrap_or(defaults.catalog_base_url),
      page_size,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_defaults_when_unset() {
    temp_env::with_vars_unset([DATABASE_URL_VAR, CATALOG_BASE_URL_VAR, PAGE_SIZE_VAR], || {
      let config = AppConfig::from_env().unwrap();
      assert_eq!(config, AppConfig::default());
      assert_eq!(config.page_size, 10);
    });
  }

  #[test]
  #[serial]
  fn test_env_overrides() {
    temp_env::with_vars(
      [
        (DATABASE_URL_VAR, Some("sqlite::memory:")),
        (CATALOG_BASE_URL_VAR, Some("http://localhost:9000/api")),
        (PAGE_SIZE_VAR, Some("25")),
      ],
      || {
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.catalog_base_url, "http://localhost:9000/api");
        assert_eq!(config.page_size, 25);
      },
    );
  }

  #[test]
  #[serial]
  fn test_rejects_zero_page_size() {
    temp_env::with_var(PAGE_SIZE_VAR, Some("0"), || {
      let err = AppConfig::from_env().unwrap_err();
      assert!(err.to_string().contains(PAGE_SIZE_VAR));
    });
  }

  #[test]
  #[serial]
  fn test_rejects_non_numeric_page_size() {
    temp_env::with_var(PAGE_SIZE_VAR, Some("ten"), || {
      assert!(matches!(
        AppConfig::from_env(),
        Err(ConfigError::Invalid { key: PAGE_SIZE_VAR, .. })
      ));
    });
  }
}
