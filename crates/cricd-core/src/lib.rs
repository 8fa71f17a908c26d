//! cricd core: delivery normalisation for ball-by-ball scorecards.
//!
//! Turns the nested innings → over → delivery layout of a scorecard into a
//! flat, ordered sequence of typed [`BallEvent`]s for a statistics API.
//!
//! ## Pipeline
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | Classify | [`classifier`] | one [`EventType`] per delivery from its extras/wicket |
//! | Resolve | [`resolver`] | player/team/umpire names to ids, single-flight cached |
//! | Materialise | [`materializer`] | per-type fields (runs, dismissed batsman, crossing) |
//! | Number | [`sequencer`] | over, delivery-in-over and legal-ball counts |
//! | Traverse | [`innings`] | threads an innings through the stages above |
//! | Import | [`import`] | scorecard file → match record → chunked event submission |
//!
//! ## Example
//!
//! ```rust
//! use cricd_core::{BallSequencer, DeliveryPosition, EventType};
//!
//! let seq = BallSequencer::new();
//! let (seq, first) = seq.advance("0.1".parse::<DeliveryPosition>()?, EventType::Delivery);
//! let (seq, wide) = seq.advance("0.2".parse::<DeliveryPosition>()?, EventType::Wide);
//! let (_, third) = seq.advance("0.3".parse::<DeliveryPosition>()?, EventType::Delivery);
//!
//! assert_eq!((first.delivery, first.ball), (1, 1));
//! assert_eq!((wide.delivery, wide.ball), (2, 2));
//! assert_eq!((third.delivery, third.ball), (3, 2));
//! # Ok::<(), cricd_core::IngestError>(())
//! ```

pub mod classifier;
pub mod domain;
pub mod error;
pub mod fakes;
pub mod import;
pub mod innings;
pub mod match_info;
pub mod materializer;
pub mod obs;
pub mod resolver;
pub mod scorecard;
pub mod sequencer;
pub mod storage_traits;
pub mod telemetry;

pub use classifier::{classify, classify_wicket};
pub use domain::{
    BallEvent, BallPosition, Batsmen, Delivery, DeliveryPosition, EntityId, EntityKind,
    EventOutcome, EventType, Extras, MatchContext, Runs, Team, Wicket,
};
pub use error::{CollaboratorError, IngestError, Result};
pub use import::{
    is_scorecard, FileImporter, ImportConfig, ImportReport, ImportSummary, DEFAULT_CHUNK_SIZE,
};
pub use innings::InningsIterator;
pub use match_info::{
    extract_match_details, extract_teams, extract_umpires, MatchDetails, NewMatch,
};
pub use materializer::{materialize, BaseEvent};
pub use resolver::{CachingResolver, EntityBackend, EntityCache, EntityResolver};
pub use scorecard::{DeliveryEntry, InningsEntry, InningsRecord, MatchInfo, Scorecard};
pub use sequencer::{did_cross, BallNumber, BallSequencer};
pub use storage_traits::{submit_in_chunks, EventSink, MatchRegistry};
pub use telemetry::init_tracing;

/// cricd version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
