//! Entity resolution with an explicit, single-flight cache.
//!
//! - `EntityBackend`: creates an entity upstream and returns its id
//! - `EntityResolver`: what the innings iterator calls; idempotent per
//!   `(kind, name)`
//! - `CachingResolver`: the resolver built from a backend and an
//!   [`EntityCache`]
//!
//! The cache holds one `OnceCell` per key. Concurrent lookups of the same
//! key wait on that cell, so at most one creation per key is ever in flight.
//! A failed creation leaves the cell empty and the next caller retries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::{EntityId, EntityKind};
use crate::error::{CollaboratorError, IngestError, Result};
use crate::obs;

/// Upstream store that creates players, teams and umpires.
#[async_trait]
pub trait EntityBackend: Send + Sync {
    /// Create an entity and return its id. `team` is set for players.
    async fn create_entity(
        &self,
        kind: EntityKind,
        name: &str,
        team: Option<&EntityId>,
    ) -> std::result::Result<EntityId, CollaboratorError>;
}

/// Resolves names to stable ids.
///
/// Guarantees:
/// - Repeated calls with the same `(kind, name)` return the same id.
/// - Only the first call for a key reaches the backend.
/// - An empty name fails with `IngestError::MissingRequiredName`.
#[async_trait]
pub trait EntityResolver: Send + Sync {
    async fn resolve(&self, kind: EntityKind, name: &str, team: Option<&EntityId>)
        -> Result<EntityId>;
}

type CacheKey = (EntityKind, String);

/// Resolved ids keyed by `(kind, name)`.
///
/// Share one cache (via `Arc`) across resolvers to keep ids stable for the
/// lifetime of a run.
#[derive(Debug, Default)]
pub struct EntityCache {
    slots: Mutex<HashMap<CacheKey, Arc<OnceCell<EntityId>>>>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: EntityKind, name: &str) -> Arc<OnceCell<EntityId>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry((kind, name.to_string()))
            .or_default()
            .clone()
    }

    /// Cached id for a key, if it has been resolved.
    pub fn get(&self, kind: EntityKind, name: &str) -> Option<EntityId> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(&(kind, name.to_string()))
            .and_then(|cell| cell.get().cloned())
    }

    /// Number of resolved entries.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|cell| cell.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`EntityResolver`] backed by an [`EntityBackend`] and an [`EntityCache`].
pub struct CachingResolver<B: EntityBackend> {
    backend: B,
    cache: Arc<EntityCache>,
}

impl<B: EntityBackend> CachingResolver<B> {
    /// Create a resolver with a fresh cache.
    pub fn new(backend: B) -> Self {
        Self::with_cache(backend, Arc::new(EntityCache::new()))
    }

    /// Create a resolver that shares an existing cache.
    pub fn with_cache(backend: B, cache: Arc<EntityCache>) -> Self {
        Self { backend, cache }
    }

    pub fn cache(&self) -> &Arc<EntityCache> {
        &self.cache
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: EntityBackend> EntityResolver for CachingResolver<B> {
    async fn resolve(
        &self,
        kind: EntityKind,
        name: &str,
        team: Option<&EntityId>,
    ) -> Result<EntityId> {
        if name.is_empty() {
            return Err(IngestError::MissingRequiredName {
                role: kind.as_str(),
            });
        }

        let slot = self.cache.slot(kind, name);
        if let Some(id) = slot.get() {
            obs::emit_entity_cached(kind, name);
            return Ok(id.clone());
        }

        let id = slot
            .get_or_try_init(|| async {
                let id = self
                    .backend
                    .create_entity(kind, name, team)
                    .await
                    .map_err(|source| IngestError::EntityResolution {
                        kind,
                        name: name.to_string(),
                        source,
                    })?;
                obs::emit_entity_created(kind, name, &id);
                Ok::<_, IngestError>(id)
            })
            .await?;
        Ok(id.clone())
    }
}
