//! Subscriber installation

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, TestWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

fn make_writer(config: &Config) -> BoxMakeWriter {
    if config.test_writer {
        BoxMakeWriter::new(TestWriter::new)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// - [`LogError::Filter`] if `config.level` is not a valid directive
/// - [`LogError::AlreadyInitialized`] if a subscriber is already installed
pub fn init(config: &Config) -> LogResult<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LogError::Filter(format!("{}: {e}", config.level)))?;
    let registry = Registry::default().with(filter);
    let writer = make_writer(config);

    let installed = match config.format {
        Format::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.colors)
                    .with_writer(writer),
            )
            .try_init(),
        Format::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.colors)
                    .with_writer(writer),
            )
            .try_init(),
        Format::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(writer),
            )
            .try_init(),
    };

    installed.map_err(|_| LogError::AlreadyInitialized)
}

/// Install the test preset, ignoring an already-installed subscriber.
pub fn init_test() {
    let _ = init(&Config::test());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_rejected_before_install() {
        let config = Config {
            level: "keyward=[".to_string(),
            ..Config::test()
        };
        assert!(matches!(init(&config), Err(LogError::Filter(_))));
    }

    #[test]
    fn init_test_is_repeatable() {
        init_test();
        init_test();
        tracing::info!(target: "keyward_log", "still alive");
    }
}
