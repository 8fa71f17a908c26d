//! Event materialisation.
//!
//! Once a delivery is classified and its players resolved, [`materialize`]
//! attaches the type-dependent fields. The match over [`EventType`] is
//! exhaustive, so a new event type cannot be added without a handler.

use chrono::NaiveDate;

use crate::domain::{BallEvent, BallPosition, Batsmen, Delivery, EntityId, EventOutcome, EventType};

/// Fields every ball event carries regardless of its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEvent {
    pub match_id: EntityId,
    pub timestamp: NaiveDate,
    pub ball: BallPosition,
    pub batsmen: Option<Batsmen>,
    pub bowler: Option<EntityId>,
    pub fielder: Option<EntityId>,
}

/// Build the final event for a classified delivery.
///
/// `dismissed` is the resolved `player_out`, used by the types where the
/// dismissed batsman is not necessarily the striker. `did_cross` is only
/// recorded on `caught`.
pub fn materialize(
    base: BaseEvent,
    event_type: EventType,
    delivery: &Delivery,
    dismissed: Option<EntityId>,
    did_cross: bool,
) -> BallEvent {
    let runs = delivery.runs;
    let outcome = match event_type {
        EventType::Bowled => EventOutcome::Bowled,
        EventType::Lbw => EventOutcome::Lbw,
        EventType::Stumped => EventOutcome::Stumped,
        EventType::HitWicket => EventOutcome::HitWicket,
        EventType::DoubleHit => EventOutcome::DoubleHit,
        EventType::HandledBall => EventOutcome::HandledBall,
        EventType::Retired => EventOutcome::Retired { batsman: dismissed },
        EventType::TimedOut => EventOutcome::TimedOut { batsman: dismissed },
        EventType::Obstruction => EventOutcome::Obstruction { batsman: dismissed },
        EventType::Delivery => EventOutcome::Delivery { runs: runs.batsman },
        EventType::NoBall => EventOutcome::NoBall { runs: runs.batsman },
        EventType::Wide => EventOutcome::Wide {
            runs: runs.total.saturating_sub(1),
        },
        EventType::LegBye => EventOutcome::LegBye { runs: runs.total },
        EventType::Bye => EventOutcome::Bye { runs: runs.total },
        EventType::PenaltyRuns => EventOutcome::PenaltyRuns { runs: runs.total },
        EventType::Caught => EventOutcome::Caught { did_cross },
        EventType::RunOut => EventOutcome::RunOut {
            runs: runs.total,
            batsman: dismissed,
        },
    };

    BallEvent {
        match_id: base.match_id,
        timestamp: base.timestamp,
        ball: base.ball,
        batsmen: base.batsmen,
        bowler: base.bowler,
        fielder: base.fielder,
        outcome,
    }
}
