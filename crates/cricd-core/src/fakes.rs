//! In-memory fakes for the collaborator traits (testing only)
//!
//! Provides `MemoryEntityBackend`, `MemoryMatchRegistry` and
//! `MemoryEventSink`, which record every call so tests can assert on what
//! reached the upstream API.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{BallEvent, EntityId, EntityKind};
use crate::error::CollaboratorError;
use crate::match_info::NewMatch;
use crate::resolver::EntityBackend;
use crate::storage_traits::{EventSink, MatchRegistry};

// ---------------------------------------------------------------------------
// MemoryEntityBackend
// ---------------------------------------------------------------------------

/// One creation call received by [`MemoryEntityBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creation {
    pub kind: EntityKind,
    pub name: String,
    pub team: Option<EntityId>,
}

/// Entity backend that hands out ids of the form `<kind>-<n>`.
#[derive(Debug, Default)]
pub struct MemoryEntityBackend {
    creations: Mutex<Vec<Creation>>,
    failing: Mutex<HashSet<String>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemoryEntityBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every creation call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every creation for `name`.
    pub fn failing_on(self, name: &str) -> Self {
        self.failing.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn creations(&self) -> Vec<Creation> {
        self.creations.lock().unwrap().clone()
    }

    pub fn creation_count(&self) -> usize {
        self.creations.lock().unwrap().len()
    }

    /// Highest number of creation calls observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityBackend for MemoryEntityBackend {
    async fn create_entity(
        &self,
        kind: EntityKind,
        name: &str,
        team: Option<&EntityId>,
    ) -> Result<EntityId, CollaboratorError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(name) {
            return Err(format!("upstream rejected {kind} {name}").into());
        }

        let mut creations = self.creations.lock().unwrap();
        creations.push(Creation {
            kind,
            name: name.to_string(),
            team: team.cloned(),
        });
        Ok(EntityId(format!("{kind}-{}", creations.len())))
    }
}

// ---------------------------------------------------------------------------
// MemoryMatchRegistry
// ---------------------------------------------------------------------------

/// Match registry that stores created matches in a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryMatchRegistry {
    matches: Mutex<Vec<NewMatch>>,
    fail: bool,
}

impl MemoryMatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every match creation.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn matches(&self) -> Vec<NewMatch> {
        self.matches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatchRegistry for MemoryMatchRegistry {
    async fn create_match(&self, record: &NewMatch) -> Result<EntityId, CollaboratorError> {
        if self.fail {
            return Err("match store unavailable".into());
        }
        let mut matches = self.matches.lock().unwrap();
        matches.push(record.clone());
        Ok(EntityId(format!("match-{}", matches.len())))
    }
}

// ---------------------------------------------------------------------------
// MemoryEventSink
// ---------------------------------------------------------------------------

/// Event sink that keeps every accepted batch.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    batches: Mutex<Vec<Vec<BallEvent>>>,
    calls: AtomicUsize,
    fail_on_batch: Option<usize>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the batch with this zero-based call index.
    pub fn failing_on_batch(mut self, index: usize) -> Self {
        self.fail_on_batch = Some(index);
        self
    }

    /// Accepted batches, in submission order.
    pub fn batches(&self) -> Vec<Vec<BallEvent>> {
        self.batches.lock().unwrap().clone()
    }

    /// All accepted events, flattened.
    pub fn events(&self) -> Vec<BallEvent> {
        self.batches.lock().unwrap().concat()
    }
}

#[async_trait]
impl EventSink for MemoryEventSink {
    async fn submit(&self, events: &[BallEvent]) -> Result<usize, CollaboratorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_batch == Some(call) {
            return Err(format!("batch {call} rejected").into());
        }
        self.batches.lock().unwrap().push(events.to_vec());
        Ok(events.len())
    }
}
