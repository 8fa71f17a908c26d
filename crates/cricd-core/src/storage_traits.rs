//! Collaborator traits for persisting matches and ball events.
//!
//! - `MatchRegistry`: creates the match record events are filed under
//! - `EventSink`: accepts ordered batches of ball events
//!
//! Both are async and backend-agnostic. In-memory fakes live in the
//! `fakes` module; the HTTP implementation lives in `cricd-client`.

use async_trait::async_trait;

use crate::domain::{BallEvent, EntityId};
use crate::error::{CollaboratorError, IngestError, Result};
use crate::match_info::NewMatch;
use crate::obs;

/// Store that creates match records.
#[async_trait]
pub trait MatchRegistry: Send + Sync {
    /// Create a match and return its id.
    async fn create_match(&self, record: &NewMatch)
        -> std::result::Result<EntityId, CollaboratorError>;
}

/// Destination for ball events.
///
/// Guarantees expected of implementations:
/// - A batch is stored in the order given.
/// - The returned count is the number of events stored.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn submit(&self, events: &[BallEvent]) -> std::result::Result<usize, CollaboratorError>;
}

/// Submit `events` in sequential chunks of `chunk_size`, preserving order.
///
/// Stops at the first failing chunk; chunks already accepted are not
/// withdrawn. Returns the total number of events stored.
pub async fn submit_in_chunks(
    sink: &dyn EventSink,
    events: &[BallEvent],
    chunk_size: usize,
) -> Result<usize> {
    let mut stored = 0;
    for (index, chunk) in events.chunks(chunk_size.max(1)).enumerate() {
        let accepted = sink
            .submit(chunk)
            .await
            .map_err(|source| IngestError::Submission { source })?;
        obs::emit_chunk_submitted(index, chunk.len(), accepted);
        stored += accepted;
    }
    Ok(stored)
}
