use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::catalog::CatalogClient;
use crate::config::AppConfig;
use crate::dao::{FitnessEventDao, PreferenceDao, UserDao, WorkoutDao};

pub type DbPool = SqlitePool;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),
}

/// ---------------------------------------------------------------------------
/// Change Tracking
/// ---------------------------------------------------------------------------

/// Tables that read subscriptions can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
  Users,
  Workouts,
  FitnessEvents,
  Preferences,
}

/// One version counter per table, bumped after every committed write that
/// touched at least one row.
#[derive(Debug)]
pub struct ChangeTracker {
  users: watch::Sender<u64>,
  workouts: watch::Sender<u64>,
  fitness_events: watch::Sender<u64>,
  preferences: watch::Sender<u64>,
}

impl ChangeTracker {
  pub fn new() -> Self {
    Self {
      users: watch::channel(0).0,
      workouts: watch::channel(0).0,
      fitness_events: watch::channel(0).0,
      preferences: watch::channel(0).0,
    }
  }

  fn sender(&self, table: Table) -> &watch::Sender<u64> {
    match table {
      Table::Users => &self.users,
      Table::Workouts => &self.workouts,
      Table::FitnessEvents => &self.fitness_events,
      Table::Preferences => &self.preferences,
    }
  }

  pub fn notify(&self, table: Table) {
    // send_modify succeeds even with no live receivers
    self.sender(table).send_modify(|version| *version += 1);
  }

  pub fn watch(&self, table: Table) -> watch::Receiver<u64> {
    self.sender(table).subscribe()
  }

  pub fn version(&self, table: Table) -> u64 {
    *self.sender(table).borrow()
  }
}

impl Default for ChangeTracker {
  fn default() -> Self {
    Self::new()
  }
}

/// ---------------------------------------------------------------------------
/// Database Handle
/// ---------------------------------------------------------------------------

/// Shared handle to the entity store. Cheap to clone; every DAO holds one.
#[derive(Debug, Clone)]
pub struct Database {
  pub pool: DbPool,
  pub changes: Arc<ChangeTracker>,
}

impl Database {
  /// Wrap an already-migrated pool.
  pub fn new(pool: DbPool) -> Self {
    Self {
      pool,
      changes: Arc::new(ChangeTracker::new()),
    }
  }

  /// Open (creating if needed) the database at `database_url` and run migrations.
  pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let in_memory = is_in_memory(database_url);

    // An in-memory database lives only as long as its single connection
    let pool_options = if in_memory {
      SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
    } else {
      SqlitePoolOptions::new().max_connections(5)
    };

    tracing::info!(database_url, in_memory, "Initializing database");

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database initialized successfully");

    Ok(Self::new(pool))
  }

  pub fn users(&self) -> UserDao {
    UserDao::new(self.clone())
  }

  pub fn workouts(&self) -> WorkoutDao {
    WorkoutDao::new(self.clone())
  }

  pub fn events(&self) -> FitnessEventDao {
    FitnessEventDao::new(self.clone())
  }

  pub fn preferences(&self) -> PreferenceDao {
    PreferenceDao::new(self.clone())
  }

  /// Bump the table's version when a write affected rows.
  pub(crate) fn committed(&self, table: Table, rows_affected: u64) {
    if rows_affected > 0 {
      self.changes.notify(table);
    }
  }

  pub async fn close(&self) {
    self.pool.close().await;
  }
}

/// `sqlite::memory:` or any URL opened with `mode=memory`.
fn is_in_memory(database_url: &str) -> bool {
  database_url.contains(":memory:")
    || database_url
      .split_once('?')
      .map(|(_, query)| query.split('&').any(|pair| pair == "mode=memory"))
      .unwrap_or(false)
}

/// ---------------------------------------------------------------------------
/// Application State
/// ---------------------------------------------------------------------------

/// Composition root: owns the store and the catalog client for the app's lifetime.
pub struct AppState {
  pub config: AppConfig,
  pub db: Database,
  pub catalog: CatalogClient,
}

impl AppState {
  pub async fn initialize(config: AppConfig) -> Result<Self, StoreError> {
    let db = Database::connect(&config.database_url).await?;
    let catalog = CatalogClient::new(&config.catalog_base_url);

    Ok(Self { config, db, catalog })
  }

  /// A fresh cursor over the exercise catalog using the configured page size.
  pub fn exercise_cursor(&self) -> crate::pagination::PaginationCursor<CatalogClient> {
    crate::pagination::PaginationCursor::new(self.catalog.clone(), self.config.page_size)
  }
}
