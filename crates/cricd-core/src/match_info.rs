//! Match-level extraction: details, teams and umpires.

use chrono::NaiveDate;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::domain::{EntityId, EntityKind, Team};
use crate::error::{IngestError, Result};
use crate::resolver::EntityResolver;
use crate::scorecard::MatchInfo;

/// Descriptive fields of a match, taken straight from the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    pub location: Option<String>,
    pub venue: Option<String>,
    pub start_date: NaiveDate,
    /// Innings per side: 2 for multi-innings matches, otherwise 1.
    pub number_of_innings: u32,
    pub number_of_overs: Option<u32>,
}

/// Match record submitted to the [`MatchRegistry`](crate::storage_traits::MatchRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    #[serde(flatten)]
    pub details: MatchDetails,
    pub umpires: Vec<EntityId>,
    pub home_team: EntityId,
    pub away_team: EntityId,
}

/// Extract match details. `innings_count` is the number of innings recorded.
pub fn extract_match_details(info: &MatchInfo, innings_count: usize) -> Result<MatchDetails> {
    let start_date = *info
        .dates
        .first()
        .ok_or_else(|| IngestError::Scorecard("match info has no dates".to_string()))?;

    Ok(MatchDetails {
        location: info.city.clone(),
        venue: info.venue.clone(),
        start_date,
        number_of_innings: if innings_count > 2 { 2 } else { 1 },
        number_of_overs: info.overs,
    })
}

/// Resolve the home (first listed) and away (second listed) teams.
pub async fn extract_teams(info: &MatchInfo, resolver: &dyn EntityResolver) -> Result<(Team, Team)> {
    let [home, away] = match info.teams.as_slice() {
        [home, away, ..] => [home, away],
        other => {
            return Err(IngestError::Scorecard(format!(
                "match info lists {} teams, expected 2",
                other.len()
            )))
        }
    };

    let (home_id, away_id) = tokio::try_join!(
        resolver.resolve(EntityKind::Team, home, None),
        resolver.resolve(EntityKind::Team, away, None),
    )?;

    Ok((
        Team {
            id: home_id,
            name: home.clone(),
        },
        Team {
            id: away_id,
            name: away.clone(),
        },
    ))
}

/// Resolve every umpire concurrently, keeping list order.
pub async fn extract_umpires(info: &MatchInfo, resolver: &dyn EntityResolver) -> Result<Vec<EntityId>> {
    try_join_all(
        info.umpires
            .iter()
            .map(|name| resolver.resolve(EntityKind::Umpire, name, None)),
    )
    .await
}
