use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "fitness_tracker_lib=debug,info";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Calling this again after a subscriber is set does nothing.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

  let format = tracing_subscriber::fmt::layer().with_target(false);

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(format)
    .try_init();
}
