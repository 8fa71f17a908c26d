//! Over and ball numbering.
//!
//! Scorecards number every delivery bowled in an over, legal or not. The
//! legal-ball count that completes an over has to be derived: it resets when
//! the over changes and only advances past legal deliveries.
//!
//! [`BallSequencer`] is a plain value; [`BallSequencer::advance`] returns the
//! next state together with the numbering for the delivery, so the counters
//! can be exercised without any I/O.

use crate::domain::{Delivery, DeliveryPosition, EventType};

/// Numbering assigned to one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallNumber {
    pub over: u32,
    pub delivery: u32,
    /// Legal-ball count within the over.
    pub ball: u32,
}

/// Per-innings numbering state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallSequencer {
    current_over: u32,
    next_legal_ball: u32,
}

impl Default for BallSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl BallSequencer {
    /// State at the start of an innings.
    pub fn new() -> Self {
        BallSequencer {
            current_over: 0,
            next_legal_ball: 1,
        }
    }

    pub fn current_over(&self) -> u32 {
        self.current_over
    }

    /// Legal-ball number the next delivery in the current over would get.
    pub fn next_legal_ball(&self) -> u32 {
        self.next_legal_ball
    }

    /// Number a delivery at `position` classified as `event_type`.
    pub fn advance(self, position: DeliveryPosition, event_type: EventType) -> (Self, BallNumber) {
        let mut next = self;
        if position.over != next.current_over {
            next.next_legal_ball = 1;
            next.current_over = position.over;
        }

        let number = BallNumber {
            over: position.over,
            delivery: position.delivery,
            ball: next.next_legal_ball,
        };

        if event_type.is_legal() {
            next.next_legal_ball += 1;
        }

        (next, number)
    }
}

/// Whether the batsmen crossed during `current`, judged by who faces `next`.
///
/// True only when the non-striker of `current` is on strike for the
/// following delivery of the same innings.
pub fn did_cross(current: &Delivery, next: Option<&Delivery>) -> bool {
    match (current.non_striker.as_deref(), next) {
        (Some(non_striker), Some(next)) => next.batsman.as_deref() == Some(non_striker),
        _ => false,
    }
}
