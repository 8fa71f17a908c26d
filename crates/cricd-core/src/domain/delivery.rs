//! Raw delivery records as they appear in a scorecard.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// One ball bowled, legal or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Striker's name.
    #[serde(default)]
    pub batsman: Option<String>,
    #[serde(default)]
    pub non_striker: Option<String>,
    #[serde(default)]
    pub bowler: Option<String>,
    pub runs: Runs,
    #[serde(default)]
    pub extras: Option<Extras>,
    #[serde(default)]
    pub wicket: Option<Wicket>,
}

/// Runs scored off a delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runs {
    /// Runs credited to the striker.
    pub batsman: u32,
    #[serde(default)]
    pub extras: u32,
    /// All runs conceded, extras included.
    pub total: u32,
}

/// Extras conceded. Scorecards set at most one of these; only presence matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub noballs: Option<u32>,
    #[serde(default)]
    pub wides: Option<u32>,
    #[serde(default)]
    pub legbyes: Option<u32>,
    #[serde(default)]
    pub byes: Option<u32>,
    #[serde(default)]
    pub penalty: Option<u32>,
}

/// A dismissal recorded against a delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wicket {
    pub kind: String,
    #[serde(default)]
    pub player_out: Option<String>,
    /// Fielders involved; the first one is credited.
    #[serde(default)]
    pub fielders: Option<Vec<String>>,
}

impl Wicket {
    /// Primary fielder, if a fielder list was recorded.
    ///
    /// `Some(None)` means the list exists but is empty.
    pub fn primary_fielder(&self) -> Option<Option<&str>> {
        self.fielders
            .as_ref()
            .map(|fielders| fielders.first().map(String::as_str))
    }
}

/// Over number and running count of deliveries in that over, parsed from
/// the `"<over>.<delivery>"` key a scorecard files each delivery under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeliveryPosition {
    pub over: u32,
    /// Every delivery bowled in the over counts, legal or not.
    pub delivery: u32,
}

impl FromStr for DeliveryPosition {
    type Err = IngestError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || IngestError::InvalidPosition(s.to_string());
        let (over, delivery) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(DeliveryPosition {
            over: over.parse().map_err(|_| invalid())?,
            delivery: delivery.parse().map_err(|_| invalid())?,
        })
    }
}

impl std::fmt::Display for DeliveryPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.over, self.delivery)
    }
}
