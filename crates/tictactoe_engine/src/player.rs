//! Player identities and the pairing that owns a session.

use crate::{MAX_NAME_LEN, Mark, PlayerNameError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A validated player name: trimmed, non-empty, at most 50 characters.
///
/// Names are the only identity a player has. Two players using the same name
/// share a leaderboard record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Trims and validates a raw name.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerNameError::Empty`] or [`PlayerNameError::TooLong`].
    pub fn parse(raw: &str) -> Result<Self, PlayerNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlayerNameError::Empty);
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(PlayerNameError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = PlayerNameError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two players of a session. The first name plays X.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(try_from = "RawPairing")]
pub struct Pairing {
    /// Player using X.
    player_x: PlayerName,
    /// Player using O.
    player_o: PlayerName,
}

impl Pairing {
    /// Validates both names and pairs them.
    ///
    /// Checks run in order: empty, duplicate, too long. Names are compared
    /// after trimming, case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlayerNameError`] found.
    #[instrument(skip(player_x, player_o))]
    pub fn new(player_x: &str, player_o: &str) -> Result<Self, PlayerNameError> {
        let (x, o) = (player_x.trim(), player_o.trim());
        if x.is_empty() || o.is_empty() {
            warn!("Rejected pairing with an empty name");
            return Err(PlayerNameError::Empty);
        }
        if x == o {
            warn!(name = %x, "Rejected pairing with duplicate names");
            return Err(PlayerNameError::Duplicate);
        }
        let pairing = Self {
            player_x: PlayerName::parse(x)?,
            player_o: PlayerName::parse(o)?,
        };
        debug!(player_x = %pairing.player_x, player_o = %pairing.player_o, "Pairing created");
        Ok(pairing)
    }

    /// Name of the player holding `mark`.
    pub fn name_of(&self, mark: Mark) -> &PlayerName {
        match mark {
            Mark::X => &self.player_x,
            Mark::O => &self.player_o,
        }
    }
}

/// Unvalidated wire form of [`Pairing`].
#[derive(Deserialize)]
struct RawPairing {
    player_x: String,
    player_o: String,
}

impl TryFrom<RawPairing> for Pairing {
    type Error = PlayerNameError;

    fn try_from(raw: RawPairing) -> Result<Self, Self::Error> {
        Self::new(&raw.player_x, &raw.player_o)
    }
}
