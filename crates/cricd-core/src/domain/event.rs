//! Canonical ball events.
//!
//! A [`BallEvent`] is produced for every delivery, in delivery order. The
//! type-dependent part lives in [`EventOutcome`], one variant per event type,
//! so each variant carries exactly the fields the statistics API expects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// The closed vocabulary of event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Delivery,
    NoBall,
    Wide,
    LegBye,
    Bye,
    PenaltyRuns,
    Caught,
    RunOut,
    Bowled,
    Lbw,
    Stumped,
    HitWicket,
    Obstruction,
    DoubleHit,
    HandledBall,
    TimedOut,
    Retired,
}

impl EventType {
    pub const ALL: [EventType; 17] = [
        EventType::Delivery,
        EventType::NoBall,
        EventType::Wide,
        EventType::LegBye,
        EventType::Bye,
        EventType::PenaltyRuns,
        EventType::Caught,
        EventType::RunOut,
        EventType::Bowled,
        EventType::Lbw,
        EventType::Stumped,
        EventType::HitWicket,
        EventType::Obstruction,
        EventType::DoubleHit,
        EventType::HandledBall,
        EventType::TimedOut,
        EventType::Retired,
    ];

    /// Whether this delivery counts toward the six that complete an over.
    pub fn is_legal(self) -> bool {
        !matches!(
            self,
            EventType::NoBall
                | EventType::Wide
                | EventType::TimedOut
                | EventType::PenaltyRuns
                | EventType::Retired
        )
    }

    /// Wire name, as used in the `eventType` field.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Delivery => "delivery",
            EventType::NoBall => "noBall",
            EventType::Wide => "wide",
            EventType::LegBye => "legBye",
            EventType::Bye => "bye",
            EventType::PenaltyRuns => "penaltyRuns",
            EventType::Caught => "caught",
            EventType::RunOut => "runOut",
            EventType::Bowled => "bowled",
            EventType::Lbw => "lbw",
            EventType::Stumped => "stumped",
            EventType::HitWicket => "hitWicket",
            EventType::Obstruction => "obstruction",
            EventType::DoubleHit => "doubleHit",
            EventType::HandledBall => "handledBall",
            EventType::TimedOut => "timedOut",
            EventType::Retired => "retired",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the match a delivery was bowled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallPosition {
    pub batting_team: EntityId,
    pub fielding_team: EntityId,
    /// 1-based innings number.
    pub innings: u32,
    pub over: u32,
    /// Running count of deliveries in the over, illegal ones included.
    pub delivery: u32,
    /// Legal-ball count; resets every over.
    pub ball: u32,
}

/// The two batsmen at the crease.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batsmen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub striker: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_striker: Option<EntityId>,
}

impl Batsmen {
    /// `None` when neither batsman was named, so the field is omitted.
    pub fn from_parts(striker: Option<EntityId>, non_striker: Option<EntityId>) -> Option<Self> {
        if striker.is_none() && non_striker.is_none() {
            None
        } else {
            Some(Batsmen {
                striker,
                non_striker,
            })
        }
    }
}

/// Type-dependent part of a ball event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "camelCase")]
pub enum EventOutcome {
    Delivery {
        runs: u32,
    },
    NoBall {
        runs: u32,
    },
    /// `runs` excludes the one-run wide penalty.
    Wide {
        runs: u32,
    },
    LegBye {
        runs: u32,
    },
    Bye {
        runs: u32,
    },
    PenaltyRuns {
        runs: u32,
    },
    Caught {
        #[serde(rename = "didCross")]
        did_cross: bool,
    },
    RunOut {
        runs: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batsman: Option<EntityId>,
    },
    Bowled,
    Lbw,
    Stumped,
    HitWicket,
    Obstruction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batsman: Option<EntityId>,
    },
    DoubleHit,
    HandledBall,
    TimedOut {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batsman: Option<EntityId>,
    },
    Retired {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batsman: Option<EntityId>,
    },
}

impl EventOutcome {
    pub fn event_type(&self) -> EventType {
        match self {
            EventOutcome::Delivery { .. } => EventType::Delivery,
            EventOutcome::NoBall { .. } => EventType::NoBall,
            EventOutcome::Wide { .. } => EventType::Wide,
            EventOutcome::LegBye { .. } => EventType::LegBye,
            EventOutcome::Bye { .. } => EventType::Bye,
            EventOutcome::PenaltyRuns { .. } => EventType::PenaltyRuns,
            EventOutcome::Caught { .. } => EventType::Caught,
            EventOutcome::RunOut { .. } => EventType::RunOut,
            EventOutcome::Bowled => EventType::Bowled,
            EventOutcome::Lbw => EventType::Lbw,
            EventOutcome::Stumped => EventType::Stumped,
            EventOutcome::HitWicket => EventType::HitWicket,
            EventOutcome::Obstruction { .. } => EventType::Obstruction,
            EventOutcome::DoubleHit => EventType::DoubleHit,
            EventOutcome::HandledBall => EventType::HandledBall,
            EventOutcome::TimedOut { .. } => EventType::TimedOut,
            EventOutcome::Retired { .. } => EventType::Retired,
        }
    }

    /// Runs carried by the event, for the types that carry any.
    pub fn runs(&self) -> Option<u32> {
        match self {
            EventOutcome::Delivery { runs }
            | EventOutcome::NoBall { runs }
            | EventOutcome::Wide { runs }
            | EventOutcome::LegBye { runs }
            | EventOutcome::Bye { runs }
            | EventOutcome::PenaltyRuns { runs }
            | EventOutcome::RunOut { runs, .. } => Some(*runs),
            _ => None,
        }
    }
}

/// One canonical event per delivery, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallEvent {
    #[serde(rename = "match")]
    pub match_id: EntityId,
    /// Match start date.
    pub timestamp: NaiveDate,
    pub ball: BallPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batsmen: Option<Batsmen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowler: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielder: Option<EntityId>,
    #[serde(flatten)]
    pub outcome: EventOutcome,
}

impl BallEvent {
    pub fn event_type(&self) -> EventType {
        self.outcome.event_type()
    }
}
