//! Delivery classification.
//!
//! [`classify`] maps a raw [`Delivery`] to exactly one [`EventType`]:
//! extras first (noballs > wides > legbyes > byes > penalty), then the
//! wicket kind, otherwise a plain delivery.
//!
//! When a delivery records both extras and a wicket, the extras win and the
//! wicket is not reflected in the event type.

use crate::domain::{Delivery, DeliveryPosition, EventType, Extras};
use crate::error::{IngestError, Result};

/// Classify a delivery. Pure and deterministic.
pub fn classify(position: DeliveryPosition, delivery: &Delivery) -> Result<EventType> {
    if let Some(extras) = &delivery.extras {
        return classify_extras(extras).ok_or_else(|| IngestError::UnclassifiableExtras {
            position: position.to_string(),
        });
    }

    match &delivery.wicket {
        Some(wicket) => classify_wicket(&wicket.kind),
        None => Ok(EventType::Delivery),
    }
}

fn classify_extras(extras: &Extras) -> Option<EventType> {
    if extras.noballs.is_some() {
        Some(EventType::NoBall)
    } else if extras.wides.is_some() {
        Some(EventType::Wide)
    } else if extras.legbyes.is_some() {
        Some(EventType::LegBye)
    } else if extras.byes.is_some() {
        Some(EventType::Bye)
    } else if extras.penalty.is_some() {
        Some(EventType::PenaltyRuns)
    } else {
        None
    }
}

/// Map a scorecard dismissal kind to its event type.
pub fn classify_wicket(kind: &str) -> Result<EventType> {
    let event_type = match kind {
        "caught" | "caught and bowled" => EventType::Caught,
        "run out" => EventType::RunOut,
        "bowled" => EventType::Bowled,
        "lbw" => EventType::Lbw,
        "stumped" => EventType::Stumped,
        "hit wicket" => EventType::HitWicket,
        "obstructing the field" => EventType::Obstruction,
        "hit the ball twice" => EventType::DoubleHit,
        "handled the ball" => EventType::HandledBall,
        "timed out" => EventType::TimedOut,
        "retired hurt" => EventType::Retired,
        other => {
            return Err(IngestError::UnclassifiableWicket {
                kind: other.to_string(),
            })
        }
    };
    Ok(event_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Runs, Wicket};

    fn pos() -> DeliveryPosition {
        DeliveryPosition {
            over: 0,
            delivery: 1,
        }
    }

    fn with_wicket(kind: &str) -> Delivery {
        Delivery {
            wicket: Some(Wicket {
                kind: kind.to_string(),
                player_out: Some("A".to_string()),
                fielders: None,
            }),
            ..Delivery::default()
        }
    }

    #[test]
    fn test_plain_delivery() {
        let delivery = Delivery {
            runs: Runs {
                batsman: 4,
                extras: 0,
                total: 4,
            },
            ..Delivery::default()
        };
        assert_eq!(classify(pos(), &delivery).unwrap(), EventType::Delivery);
    }

    #[test]
    fn test_wicket_table() {
        let table = [
            ("caught", EventType::Caught),
            ("caught and bowled", EventType::Caught),
            ("run out", EventType::RunOut),
            ("bowled", EventType::Bowled),
            ("lbw", EventType::Lbw),
            ("stumped", EventType::Stumped),
            ("hit wicket", EventType::HitWicket),
            ("obstructing the field", EventType::Obstruction),
            ("hit the ball twice", EventType::DoubleHit),
            ("handled the ball", EventType::HandledBall),
            ("timed out", EventType::TimedOut),
            ("retired hurt", EventType::Retired),
        ];
        for (kind, expected) in table {
            assert_eq!(classify(pos(), &with_wicket(kind)).unwrap(), expected, "{kind}");
        }
    }

    #[test]
    fn test_unknown_wicket_kind_is_an_error() {
        let err = classify(pos(), &with_wicket("retired out")).unwrap_err();
        match err {
            IngestError::UnclassifiableWicket { kind } => assert_eq!(kind, "retired out"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extras_priority() {
        let extras = Extras {
            noballs: Some(1),
            wides: Some(1),
            legbyes: Some(1),
            byes: Some(1),
            penalty: Some(5),
        };
        assert_eq!(classify_extras(&extras), Some(EventType::NoBall));

        let extras = Extras {
            noballs: None,
            ..extras
        };
        assert_eq!(classify_extras(&extras), Some(EventType::Wide));

        let extras = Extras {
            wides: None,
            ..extras
        };
        assert_eq!(classify_extras(&extras), Some(EventType::LegBye));

        let extras = Extras {
            legbyes: None,
            ..extras
        };
        assert_eq!(classify_extras(&extras), Some(EventType::Bye));

        let extras = Extras {
            byes: None,
            ..extras
        };
        assert_eq!(classify_extras(&extras), Some(EventType::PenaltyRuns));
    }

    #[test]
    fn test_extras_take_precedence_over_wicket() {
        let mut delivery = with_wicket("run out");
        delivery.extras = Some(Extras {
            byes: Some(1),
            ..Extras::default()
        });
        assert_eq!(classify(pos(), &delivery).unwrap(), EventType::Bye);
    }

    #[test]
    fn test_empty_extras_record_is_rejected() {
        let delivery = Delivery {
            extras: Some(Extras::default()),
            ..Delivery::default()
        };
        let err = classify(pos(), &delivery).unwrap_err();
        assert!(matches!(err, IngestError::UnclassifiableExtras { .. }));
    }

    #[test]
    fn test_zero_valued_extra_still_counts_as_present() {
        let delivery = Delivery {
            extras: Some(Extras {
                wides: Some(0),
                ..Extras::default()
            }),
            ..Delivery::default()
        };
        assert_eq!(classify(pos(), &delivery).unwrap(), EventType::Wide);
    }
}
