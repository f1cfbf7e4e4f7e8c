//! Where log settings come from.
//!
//! Precedence, lowest first: built-in defaults, `RUST_LOG`, `PROCMAN_LOG`,
//! `PROCMAN_LOG_FORMAT`, then the `-v`/`-q`/`--log-format`/`--log-file`
//! flags. `RUST_LOG` directives only shape the filter when neither
//! `PROCMAN_LOG` nor a flag picked the level.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain lines for a terminal.
    #[default]
    #[value(aliases = ["console", "pretty"])]
    Human,
    /// One JSON object per line.
    #[value(aliases = ["json", "structured"])]
    Jsonl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[value(alias = "warning")]
    Warn,
    Error,
    #[value(aliases = ["none", "quiet"])]
    Off,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

fn parse_value<T: ValueEnum>(raw: &str) -> Option<T> {
    T::from_str(raw.trim(), true).ok()
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Most verbose level named anywhere in a `RUST_LOG` style directive list,
/// e.g. `pm_core=debug,warn` gives `Debug`.
pub fn level_from_directives(directives: &str) -> Option<LogLevel> {
    directives
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            parse_value::<LogLevel>(level)
        })
        .min()
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Level came from `PROCMAN_LOG` or a flag; `RUST_LOG` is ignored.
    pub level_explicit: bool,
    /// Prefix human lines with a timestamp.
    pub timestamps: bool,
    /// Append here instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Human,
            level: LogLevel::Info,
            level_explicit: false,
            timestamps: true,
            file: None,
        }
    }
}

impl LogConfig {
    /// Process environment plus CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// Same as [`LogConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let procman_level = lookup("PROCMAN_LOG").and_then(|raw| parse_value::<LogLevel>(&raw));
        let level_explicit = cli_level.is_some() || procman_level.is_some();
        let env_level = procman_level
            .or_else(|| lookup("RUST_LOG").and_then(|raw| level_from_directives(&raw)));
        let env_format = lookup("PROCMAN_LOG_FORMAT").and_then(|raw| parse_value::<LogFormat>(&raw));

        let defaults = Self::default();
        Self {
            level: cli_level.or(env_level).unwrap_or(defaults.level),
            level_explicit,
            format: cli_format.or(env_format).unwrap_or(defaults.format),
            ..defaults
        }
    }

    pub fn with_format(self, format: LogFormat) -> Self {
        Self { format, ..self }
    }

    /// Pin the level; `RUST_LOG` no longer applies.
    pub fn with_level(self, level: LogLevel) -> Self {
        Self {
            level,
            level_explicit: true,
            ..self
        }
    }

    pub fn with_timestamps(self, timestamps: bool) -> Self {
        Self { timestamps, ..self }
    }

    pub fn with_file(self, file: Option<PathBuf>) -> Self {
        Self { file, ..self }
    }

    /// Whether anything will be written.
    pub fn is_enabled(&self) -> bool {
        self.level != LogLevel::Off
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn aliases_parse_case_insensitively() {
        assert_eq!(parse_value::<LogFormat>("JSON"), Some(LogFormat::Jsonl));
        assert_eq!(parse_value::<LogFormat>("pretty"), Some(LogFormat::Human));
        assert_eq!(parse_value::<LogFormat>("xml"), None);
        assert_eq!(parse_value::<LogLevel>("Warning"), Some(LogLevel::Warn));
        assert_eq!(parse_value::<LogLevel>("quiet"), Some(LogLevel::Off));
        assert_eq!(parse_value::<LogLevel>("loud"), None);
    }

    #[test]
    fn display_uses_canonical_names() {
        assert_eq!(LogFormat::Jsonl.to_string(), "jsonl");
        for level in [LogLevel::Trace, LogLevel::Warn, LogLevel::Off] {
            assert_eq!(parse_value::<LogLevel>(&level.to_string()), Some(level));
        }
    }

    #[test]
    fn directives_pick_the_most_verbose_level() {
        assert_eq!(level_from_directives("pm_core=debug,warn"), Some(LogLevel::Debug));
        assert_eq!(level_from_directives("error"), Some(LogLevel::Error));
        assert_eq!(level_from_directives("pm_core"), None);
    }

    #[test]
    fn procman_log_beats_rust_log() {
        let config = LogConfig::from_lookup(
            vars(&[("PROCMAN_LOG", "error"), ("RUST_LOG", "trace")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Error);
        assert!(config.level_explicit);

        let config = LogConfig::from_lookup(vars(&[("RUST_LOG", "trace")]), None, None);
        assert_eq!(config.level, LogLevel::Trace);
        assert!(!config.level_explicit);
    }

    #[test]
    fn quiet_flag_pins_the_level_over_rust_log() {
        let config = LogConfig::from_lookup(vars(&[("RUST_LOG", "debug")]), Some(LogLevel::Error), None);
        assert_eq!(config.level, LogLevel::Error);
        assert!(config.level_explicit);
    }

    #[test]
    fn cli_overrides_env() {
        let config = LogConfig::from_lookup(
            vars(&[("PROCMAN_LOG", "trace"), ("PROCMAN_LOG_FORMAT", "human")]),
            Some(LogLevel::Error),
            Some(LogFormat::Jsonl),
        );
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Jsonl);
    }

    #[test]
    fn builder_sets_fields() {
        let config = LogConfig::default()
            .with_format(LogFormat::Jsonl)
            .with_level(LogLevel::Off)
            .with_timestamps(false)
            .with_file(Some(PathBuf::from("/tmp/procman.log")));

        assert_eq!(config.format, LogFormat::Jsonl);
        assert!(!config.is_enabled());
        assert!(!config.timestamps);
        assert!(config.file.is_some());
    }
}
