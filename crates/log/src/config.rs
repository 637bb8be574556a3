//! Logger configuration and presets

use serde::{Deserialize, Serialize};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "KEYWARD_LOG";
/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "KEYWARD_LOG_FORMAT";

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Single-line, human readable.
    #[default]
    Compact,
    /// Multi-line with span context.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl Format {
    fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directive, e.g. `info,keyward_access=debug`.
    pub level: String,
    /// Output format.
    pub format: Format,
    /// Emit ANSI colors.
    pub colors: bool,
    /// Route output through the libtest capture writer.
    pub test_writer: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            colors: true,
            test_writer: false,
        }
    }
}

impl Config {
    /// Create configuration from environment variables.
    ///
    /// `KEYWARD_LOG` wins over `RUST_LOG`; `KEYWARD_LOG_FORMAT` accepts
    /// `pretty` or `json`, anything else falls back to compact output.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup(LOG_ENV).or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config.format = Format::parse_lossy(&format);
        }
        if config.format == Format::Json {
            config.colors = false;
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            colors: false,
            ..Self::default()
        }
    }

    /// Test configuration (captured by the test harness)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            colors: false,
            test_writer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn keyward_log_wins_over_rust_log() {
        let config = Config::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("KEYWARD_LOG", "keyward_access=trace"),
        ]));
        assert_eq!(config.level, "keyward_access=trace");
    }

    #[test]
    fn rust_log_is_the_fallback() {
        let config = Config::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.level, "warn");
    }

    #[rstest]
    #[case("pretty", Format::Pretty)]
    #[case("JSON", Format::Json)]
    #[case("logfmt", Format::Compact)]
    fn format_is_parsed_leniently(#[case] raw: &str, #[case] expected: Format) {
        let config = Config::from_lookup(lookup(&[("KEYWARD_LOG_FORMAT", raw)]));
        assert_eq!(config.format, expected);
    }

    #[test]
    fn json_output_disables_colors() {
        let config = Config::from_lookup(lookup(&[("KEYWARD_LOG_FORMAT", "json")]));
        assert!(!config.colors);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"format":"pretty"}"#).unwrap();
        assert_eq!(config.format, Format::Pretty);
        assert_eq!(config.level, "info");
    }
}
