//! # Server Configuration
//!
//! Loaded once at startup from a TOML file. Every section and every key is
//! optional; missing values take the defaults below.
//!
//! ```toml
//! [seed]
//! path = "players.toml"        # relative to this file; absent = built-in roster
//!
//! [workload]
//! workers = 100                # rounds of three concurrent jobs
//! award = 10                   # experience per award
//! pinned_player = "uid_001"    # target of the lookup jobs
//! pinned_experience = 199      # value written by the setter job
//!
//! [report]
//! exclude_display_name = "John"
//!
//! [logging]
//! filter = "info"              # RUST_LOG overrides this
//! ```

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};

/// Complete server configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    /// Where the initial players come from.
    pub seed: SeedConfig,
    /// Concurrent workload parameters.
    pub workload: WorkloadConfig,
    /// Aggregation report parameters.
    pub report: ReportConfig,
    /// Log output parameters.
    pub logging: LoggingConfig,
}

/// `[seed]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// TOML file of players. `None` selects the built-in roster.
    pub path: Option<PathBuf>,
}

/// `[workload]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkloadConfig {
    /// Number of rounds; each round spawns three threads.
    pub workers: usize,
    /// Experience added by each award.
    pub award: i64,
    /// Player targeted by the lookup jobs.
    pub pinned_player: String,
    /// Experience written by the setter job.
    pub pinned_experience: i64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            workers: 100,
            award: 10,
            pinned_player: "uid_001".to_owned(),
            pinned_experience: 199,
        }
    }
}

/// `[report]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Display name left out of the level report.
    pub exclude_display_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            exclude_display_name: "John".to_owned(),
        }
    }
}

/// `[logging]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

impl RosterConfig {
    /// Loads and validates a configuration file.
    ///
    /// A relative `seed.path` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let mut config: Self = read_toml(path)?;
        if let (Some(seed), Some(dir)) = (config.seed.path.as_mut(), path.parent()) {
            if seed.is_relative() {
                *seed = dir.join(&*seed);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(text: &str) -> ServerResult<Self> {
        let config: Self = parse_toml(text, Path::new("<inline>"))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> ServerResult<()> {
        if self.workload.workers == 0 {
            return Err(ServerError::InvalidConfig(
                "workload.workers must be at least 1".to_owned(),
            ));
        }
        if self.workload.award < 0 {
            return Err(ServerError::InvalidConfig(format!(
                "workload.award must not be negative, got {}",
                self.workload.award
            )));
        }
        if self.workload.pinned_player.trim().is_empty() {
            return Err(ServerError::InvalidConfig(
                "workload.pinned_player must not be blank".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Reads and deserializes a TOML file.
pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> ServerResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| ServerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&text, path)
}

fn parse_toml<T: DeserializeOwned>(text: &str, origin: &Path) -> ServerResult<T> {
    toml::from_str(text).map_err(|source| ServerError::ConfigParse {
        path: origin.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(tag: &str) -> PathBuf {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("test_roster_{tag}_{id}.toml"))
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = RosterConfig::from_toml("").unwrap();
        assert_eq!(config, RosterConfig::default());
        assert_eq!(config.workload.workers, 100);
        assert_eq!(config.workload.award, 10);
        assert_eq!(config.workload.pinned_player, "uid_001");
        assert_eq!(config.workload.pinned_experience, 199);
        assert_eq!(config.report.exclude_display_name, "John");
        assert_eq!(config.logging.filter, "info");
        assert!(config.seed.path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = RosterConfig::from_toml(
            r#"
            [workload]
            workers = 4

            [report]
            exclude_display_name = "queen"
            "#,
        )
        .unwrap();
        assert_eq!(config.workload.workers, 4);
        assert_eq!(config.workload.award, 10);
        assert_eq!(config.report.exclude_display_name, "queen");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = RosterConfig::from_toml("[workload]\nworkers = 0\n").unwrap_err();
        match err {
            ServerError::InvalidConfig(msg) => assert!(msg.contains("workers")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_negative_award_rejected() {
        assert!(matches!(
            RosterConfig::from_toml("[workload]\naward = -5\n"),
            Err(ServerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            RosterConfig::from_toml("[workload]\nthreads = 3\n"),
            Err(ServerError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_load_resolves_relative_seed_path() {
        let path = temp_config_path("relative");
        std::fs::write(&path, "[seed]\npath = \"players.toml\"\n").unwrap();

        let config = RosterConfig::load(&path).unwrap();
        assert_eq!(
            config.seed.path.as_deref(),
            Some(path.parent().unwrap().join("players.toml").as_path())
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_config_path("missing");
        assert!(matches!(
            RosterConfig::load(&path),
            Err(ServerError::Io { .. })
        ));
    }
}
