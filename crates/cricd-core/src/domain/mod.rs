//! Domain models for cricd.
//!
//! - `Delivery`: one raw ball as recorded in a scorecard
//! - `BallEvent`: the canonical, typed event handed to the statistics API
//! - `EntityId` / `Team` / `MatchContext`: resolved identities an event refers to

pub mod delivery;
pub mod entity;
pub mod event;

pub use delivery::{Delivery, DeliveryPosition, Extras, Runs, Wicket};
pub use entity::{EntityId, EntityKind, MatchContext, Team};
pub use event::{BallEvent, BallPosition, Batsmen, EventOutcome, EventType};
