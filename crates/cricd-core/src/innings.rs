//! Innings traversal.
//!
//! [`InningsIterator`] walks an innings' deliveries in bowling order and
//! threads each one through player resolution, classification,
//! materialisation and numbering. Deliveries are processed one at a time:
//! numbering state and the crossing lookahead both depend on order. Within a
//! single delivery the player lookups are independent and run concurrently.

use crate::classifier::classify;
use crate::domain::{
    BallEvent, BallPosition, Batsmen, Delivery, DeliveryPosition, EntityId, EntityKind,
    MatchContext, Team,
};
use crate::error::{IngestError, Result};
use crate::materializer::{materialize, BaseEvent};
use crate::obs;
use crate::resolver::EntityResolver;
use crate::scorecard::InningsRecord;
use crate::sequencer::{did_cross, BallSequencer};

/// Players referenced by one delivery, resolved to ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ResolvedPlayers {
    striker: Option<EntityId>,
    non_striker: Option<EntityId>,
    bowler: Option<EntityId>,
    fielder: Option<EntityId>,
    dismissed: Option<EntityId>,
}

/// Turns innings into ordered ball events for one match.
pub struct InningsIterator<'a> {
    context: &'a MatchContext,
    resolver: &'a dyn EntityResolver,
}

impl<'a> InningsIterator<'a> {
    pub fn new(context: &'a MatchContext, resolver: &'a dyn EntityResolver) -> Self {
        Self { context, resolver }
    }

    /// Produce one event per delivery of `innings`, in delivery order.
    ///
    /// `number` is the 1-based innings number. The first failing delivery
    /// aborts the innings; entities resolved before the failure stay created.
    pub async fn process(&self, innings: &InningsRecord, number: u32) -> Result<Vec<BallEvent>> {
        let (batting, fielding) = self.context.sides_for(&innings.team).ok_or_else(|| {
            IngestError::UnknownBattingTeam {
                team: innings.team.clone(),
                home: self.context.home.name.clone(),
                away: self.context.away.name.clone(),
            }
        })?;

        let deliveries = &innings.deliveries;
        let mut sequencer = BallSequencer::new();
        let mut events = Vec::with_capacity(deliveries.len());

        for (index, entry) in deliveries.iter().enumerate() {
            let position: DeliveryPosition = entry.position.parse()?;
            let next = deliveries.get(index + 1).map(|next| &next.delivery);
            let crossed = did_cross(&entry.delivery, next);

            let players = self
                .resolve_players(&entry.delivery, batting, fielding)
                .await?;

            let event_type = match classify(position, &entry.delivery) {
                Ok(event_type) => event_type,
                Err(IngestError::UnclassifiableWicket { kind }) => {
                    obs::emit_unclassifiable_wicket(number, &entry.position, &kind);
                    return Err(IngestError::UnclassifiableWicket { kind });
                }
                Err(err) => return Err(err),
            };

            let (next_state, ball) = sequencer.advance(position, event_type);
            sequencer = next_state;

            let base = BaseEvent {
                match_id: self.context.match_id.clone(),
                timestamp: self.context.start_date,
                ball: BallPosition {
                    batting_team: batting.id.clone(),
                    fielding_team: fielding.id.clone(),
                    innings: number,
                    over: ball.over,
                    delivery: ball.delivery,
                    ball: ball.ball,
                },
                batsmen: Batsmen::from_parts(players.striker, players.non_striker),
                bowler: players.bowler,
                fielder: players.fielder,
            };
            events.push(materialize(
                base,
                event_type,
                &entry.delivery,
                players.dismissed,
                crossed,
            ));
        }

        obs::emit_innings_processed(number, &batting.name, events.len());
        Ok(events)
    }

    async fn resolve_players(
        &self,
        delivery: &Delivery,
        batting: &Team,
        fielding: &Team,
    ) -> Result<ResolvedPlayers> {
        let wicket = delivery.wicket.as_ref();
        // An empty fielder list resolves as an empty name and is rejected.
        let fielder = wicket
            .and_then(|w| w.primary_fielder())
            .map(|first| first.unwrap_or_default());
        let dismissed = wicket.and_then(|w| w.player_out.as_deref());

        let (striker, non_striker, bowler, fielder, dismissed) = tokio::try_join!(
            self.resolve_role("striker", delivery.batsman.as_deref(), batting),
            self.resolve_role("non-striker", delivery.non_striker.as_deref(), batting),
            self.resolve_role("bowler", delivery.bowler.as_deref(), fielding),
            self.resolve_role("fielder", fielder, fielding),
            self.resolve_role("dismissed batsman", dismissed, batting),
        )?;

        Ok(ResolvedPlayers {
            striker,
            non_striker,
            bowler,
            fielder,
            dismissed,
        })
    }

    async fn resolve_role(
        &self,
        role: &'static str,
        name: Option<&str>,
        team: &Team,
    ) -> Result<Option<EntityId>> {
        match name {
            None => Ok(None),
            Some("") => Err(IngestError::MissingRequiredName { role }),
            Some(name) => self
                .resolver
                .resolve(EntityKind::Player, name, Some(&team.id))
                .await
                .map(Some),
        }
    }
}
