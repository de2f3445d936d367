//! # Seed Sources
//!
//! The one-shot bulk load run at startup. A source inserts zero or more
//! players with a single `insert_all` call and reports pass/fail; the server
//! logs a failure and carries on with whatever the registry holds.
//!
//! Seed file format:
//!
//! ```toml
//! [[players]]
//! uid = "uid_001"
//! display_name = "king"
//! game_level = 1
//! experience = 100
//! ```

use std::path::{Path, PathBuf};

use roster_core::{Player, PlayerRecord, PlayerRegistry, RosterResult};
use serde::Deserialize;

use crate::config::{read_toml, SeedConfig};
use crate::error::ServerResult;

/// Something that can populate a registry at startup.
pub trait SeedSource: Send + Sync {
    /// Short description for logs.
    fn describe(&self) -> String;

    /// Inserts the initial players. Returns how many were inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the players cannot be produced. Nothing is
    /// inserted in that case.
    fn load(&self, registry: &PlayerRegistry) -> ServerResult<usize>;
}

/// The built-in four-player roster.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinSeed;

impl BuiltinSeed {
    /// The built-in players.
    #[must_use]
    pub fn players() -> Vec<Player> {
        vec![
            Player::new("uid_001", "king", 1, 100),
            Player::new("uid_002", "queen", 1, 110),
            Player::new("uid_003", "soldier", 1, 120),
            Player::new("uid_004", "John", 1, 120),
        ]
    }
}

impl SeedSource for BuiltinSeed {
    fn describe(&self) -> String {
        "built-in roster".to_owned()
    }

    fn load(&self, registry: &PlayerRegistry) -> ServerResult<usize> {
        let players = Self::players();
        let count = players.len();
        registry.insert_all(players);
        Ok(count)
    }
}

/// Players read from a TOML file.
#[derive(Clone, Debug)]
pub struct TomlSeedFile {
    path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SeedFile {
    players: Vec<PlayerRecord>,
}

impl TomlSeedFile {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedSource for TomlSeedFile {
    fn describe(&self) -> String {
        format!("seed file {}", self.path.display())
    }

    fn load(&self, registry: &PlayerRegistry) -> ServerResult<usize> {
        let file: SeedFile = read_toml(&self.path)?;
        let players = file
            .players
            .into_iter()
            .map(PlayerRecord::into_player)
            .collect::<RosterResult<Vec<_>>>()?;
        let count = players.len();
        registry.insert_all(players);
        Ok(count)
    }
}

/// Picks the source named by the `[seed]` section.
#[must_use]
pub fn source_for(config: &SeedConfig) -> Box<dyn SeedSource> {
    match &config.path {
        Some(path) => Box::new(TomlSeedFile::new(path)),
        None => Box::new(BuiltinSeed),
    }
}

/// Runs a source once, logging the outcome. Returns the number inserted,
/// zero on failure.
pub fn seed_registry(source: &dyn SeedSource, registry: &PlayerRegistry) -> usize {
    match source.load(registry) {
        Ok(count) => {
            tracing::info!(source = %source.describe(), count, "registry seeded");
            count
        }
        Err(err) => {
            tracing::warn!(source = %source.describe(), error = %err, "seeding failed");
            0
        }
    }
}
