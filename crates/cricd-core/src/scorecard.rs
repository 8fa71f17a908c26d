//! Scorecard file model.
//!
//! Scorecards are YAML documents with an `info` block and a list of innings.
//! Innings and deliveries are both written as single-key maps:
//!
//! ```yaml
//! innings:
//!   - 1st innings:
//!       team: Australia
//!       deliveries:
//!         - 0.1:
//!             batsman: AJ Finch
//!             ...
//! ```
//!
//! Delivery keys are kept as raw text, so `0.10` and `0.1` stay distinct.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::Delivery;
use crate::error::Result;

/// A parsed scorecard file.
#[derive(Debug, Clone, Deserialize)]
pub struct Scorecard {
    pub info: MatchInfo,
    pub innings: Vec<InningsEntry>,
}

impl Scorecard {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Match-level information.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchInfo {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    /// Days the match was played on; the first is the start date.
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub overs: Option<u32>,
    /// Home team first, then away.
    pub teams: Vec<String>,
    #[serde(default)]
    pub umpires: Vec<String>,
}

/// One innings, labelled as in the file (e.g. `1st innings`).
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BTreeMap<String, InningsRecord>")]
pub struct InningsEntry {
    pub label: String,
    pub record: InningsRecord,
}

/// Batting team and its deliveries in bowling order.
#[derive(Debug, Clone, Deserialize)]
pub struct InningsRecord {
    pub team: String,
    #[serde(default)]
    pub deliveries: Vec<DeliveryEntry>,
}

/// A delivery filed under its `"<over>.<delivery>"` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BTreeMap<String, Delivery>")]
pub struct DeliveryEntry {
    pub position: String,
    pub delivery: Delivery,
}

fn single_entry<V>(map: BTreeMap<String, V>, what: &str) -> std::result::Result<(String, V), String> {
    let len = map.len();
    let mut entries = map.into_iter();
    match (entries.next(), len) {
        (Some(entry), 1) => Ok(entry),
        _ => Err(format!("{what} must be a single-key map, found {len} keys")),
    }
}

impl TryFrom<BTreeMap<String, InningsRecord>> for InningsEntry {
    type Error = String;

    fn try_from(map: BTreeMap<String, InningsRecord>) -> std::result::Result<Self, Self::Error> {
        let (label, record) = single_entry(map, "innings")?;
        Ok(InningsEntry { label, record })
    }
}

impl TryFrom<BTreeMap<String, Delivery>> for DeliveryEntry {
    type Error = String;

    fn try_from(map: BTreeMap<String, Delivery>) -> std::result::Result<Self, Self::Error> {
        let (position, delivery) = single_entry(map, "delivery")?;
        Ok(DeliveryEntry { position, delivery })
    }
}
