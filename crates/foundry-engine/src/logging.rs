//! Tracing setup for the `foundry` binary.
//!
//! The subscriber is installed before the configuration is read so that
//! config loading itself is logged. Once the config is known its
//! `log_filter` replaces the startup filter, unless `RUST_LOG` was set.

use tracing::{debug, Subscriber};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use crate::config::{EngineConfig, DEFAULT_LOG_FILTER};

/// Handle for swapping the active log filter after startup.
#[derive(Debug)]
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogFilter {
    /// Switches to the configured filter. A filter taken from the
    /// environment is left alone.
    pub fn apply_config(&self, config: &EngineConfig) -> anyhow::Result<()> {
        if self.from_env {
            debug!("RUST_LOG is set, ignoring configured log filter");
            return Ok(());
        }
        let filter = EnvFilter::try_new(&config.log_filter)?;
        self.handle.reload(filter)?;
        debug!(filter = %config.log_filter, "Applied configured log filter");
        Ok(())
    }

    /// Current filter directives.
    pub fn current(&self) -> anyhow::Result<String> {
        Ok(self.handle.with_current(ToString::to_string)?)
    }
}

/// Builds the subscriber and its filter handle.
///
/// `env_directives` is the value of `RUST_LOG`, if any. An unparsable value
/// falls back to [`DEFAULT_LOG_FILTER`] and leaves the config in charge.
pub fn subscriber(env_directives: Option<&str>) -> (impl Subscriber + Send + Sync, LogFilter) {
    let from_env = env_directives.and_then(|dirs| EnvFilter::try_new(dirs).ok());
    let is_env = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    (
        subscriber,
        LogFilter {
            handle,
            from_env: is_env,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(filter: &str) -> EngineConfig {
        EngineConfig {
            log_filter: filter.to_string(),
            ..EngineConfig::default()
        }
    }

    fn current(log_filter: &LogFilter) -> String {
        log_filter.current().expect("filter").to_lowercase()
    }

    #[test]
    fn test_starts_with_default_filter() {
        let (_subscriber, log_filter) = subscriber(None);
        assert_eq!(current(&log_filter), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_config_replaces_startup_filter() {
        let (_subscriber, log_filter) = subscriber(None);
        log_filter
            .apply_config(&config_with("foundry_engine=debug"))
            .expect("apply");
        assert_eq!(current(&log_filter), "foundry_engine=debug");
    }

    #[test]
    fn test_environment_wins_over_config() {
        let (_subscriber, log_filter) = subscriber(Some("warn"));
        log_filter
            .apply_config(&config_with("foundry_engine=debug"))
            .expect("apply");
        assert_eq!(current(&log_filter), "warn");
    }

    #[test]
    fn test_bad_environment_falls_back() {
        let (_subscriber, log_filter) = subscriber(Some("foundry=loud"));
        assert_eq!(current(&log_filter), DEFAULT_LOG_FILTER);
        log_filter.apply_config(&config_with("trace")).expect("apply");
        assert_eq!(current(&log_filter), "trace");
    }
}
