//! Resolved identities: players, teams, umpires and the match they play in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of entity the statistics API keeps a record for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Team,
    Umpire,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Team => "team",
            EntityKind::Umpire => "umpire",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier assigned by the statistics API.
///
/// The API may hand out numeric or string ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_string())
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved team: its id plus the name scorecards refer to it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: EntityId,
    pub name: String,
}

/// Everything an innings needs to know about the match it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    pub match_id: EntityId,
    pub start_date: NaiveDate,
    pub home: Team,
    pub away: Team,
}

impl MatchContext {
    /// Return `(batting, fielding)` for an innings recorded against `team_name`.
    ///
    /// Returns `None` when the name matches neither side.
    pub fn sides_for(&self, team_name: &str) -> Option<(&Team, &Team)> {
        if self.home.name == team_name {
            Some((&self.home, &self.away))
        } else if self.away.name == team_name {
            Some((&self.away, &self.home))
        } else {
            None
        }
    }
}
