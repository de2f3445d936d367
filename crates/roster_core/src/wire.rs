//! # Wire Format
//!
//! The external representation of a player: the four public fields under
//! fixed names, encoded as JSON. `internal_data` has no field here and can
//! never leave the process through this path.
//!
//! ```text
//! {"uid":"uid_001","display_name":"king","game_level":1,"experience":100}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};
use crate::player::{Player, PlayerId, PlayerState};

/// Owned copy of a player's public fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player identifier.
    #[serde(rename = "uid")]
    pub id: PlayerId,
    /// Name shown to other players.
    pub display_name: String,
    /// Current level.
    #[serde(rename = "game_level")]
    pub level: i32,
    /// Experience total.
    pub experience: i64,
}

impl PlayerRecord {
    pub(crate) fn from_state(id: &PlayerId, state: &PlayerState) -> Self {
        Self {
            id: id.clone(),
            display_name: state.display_name.clone(),
            level: state.level,
            experience: state.experience,
        }
    }

    /// Checks that the record can become a player.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidRecord`] if the identifier is blank.
    pub fn validate(&self) -> RosterResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(RosterError::InvalidRecord {
                reason: format!("blank uid for player {:?}", self.display_name),
            });
        }
        Ok(())
    }

    /// Validates the record and builds a fresh player from it.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidRecord`] if validation fails.
    pub fn into_player(self) -> RosterResult<Player> {
        self.validate()?;
        Ok(Player::new(self.id, self.display_name, self.level, self.experience))
    }

    /// Decodes a record from the wire format.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Serialization`] if `bytes` is not a valid record.
    pub fn from_api(bytes: &[u8]) -> RosterResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Borrowed view used for encoding without copying the strings.
#[derive(Serialize)]
struct PlayerView<'a> {
    uid: &'a PlayerId,
    display_name: &'a str,
    game_level: i32,
    experience: i64,
}

/// Encodes the public fields of a player. Caller holds the player's lock.
pub(crate) fn encode(id: &PlayerId, state: &PlayerState) -> RosterResult<Vec<u8>> {
    let view = PlayerView {
        uid: id,
        display_name: &state.display_name,
        game_level: state.level,
        experience: state.experience,
    };
    Ok(serde_json::to_vec(&view)?)
}
