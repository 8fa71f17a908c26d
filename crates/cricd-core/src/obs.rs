//! Structured observability hooks for the import lifecycle.
//!
//! - File-scoped tracing span via [`import_span`]
//! - Emission functions for key events: file start/finish/failure, innings
//!   processed, entity created, chunk submitted, unclassifiable wicket
//!
//! Events are emitted at `info!` level unless noted (filter with `RUST_LOG`).

use tracing::{debug, info, warn};

use crate::domain::{EntityId, EntityKind};

/// Span tagged with the scorecard file name.
///
/// Attach it to the import future with `tracing::Instrument` so every event
/// emitted while the file is processed carries the file name.
///
/// # Example
///
/// ```ignore
/// importer.run_pipeline(path).instrument(import_span("1001.yaml")).await
/// ```
pub fn import_span(file: &str) -> tracing::Span {
    tracing::info_span!("cricd.import", file = %file)
}

pub fn emit_file_started(file: &str) {
    info!(event = "file.started", file = %file);
}

/// Emit event: file imported and marked complete.
pub fn emit_file_completed(file: &str, total_events: usize, duration_ms: u64) {
    info!(
        event = "file.completed",
        file = %file,
        total_events = total_events,
        duration_ms = duration_ms,
    );
}

/// Emit event: file import aborted; the file is left in place (warning level).
pub fn emit_file_failed(file: &str, error: &dyn std::fmt::Display) {
    warn!(event = "file.failed", file = %file, error = %error);
}

pub fn emit_innings_processed(innings: u32, team: &str, total_events: usize) {
    info!(
        event = "innings.processed",
        innings = innings,
        team = %team,
        total_events = total_events,
    );
}

/// Emit event: a wicket kind outside the known vocabulary (warning level).
///
/// Carries the offending kind so an operator can extend the table or fix
/// the scorecard.
pub fn emit_unclassifiable_wicket(innings: u32, position: &str, kind: &str) {
    warn!(
        event = "delivery.unclassifiable_wicket",
        innings = innings,
        position = %position,
        kind = %kind,
    );
}

pub fn emit_entity_created(kind: EntityKind, name: &str, id: &EntityId) {
    info!(event = "entity.created", kind = %kind, name = %name, id = %id);
}

/// Emit event: entity served from cache (debug level).
pub fn emit_entity_cached(kind: EntityKind, name: &str) {
    debug!(event = "entity.cached", kind = %kind, name = %name);
}

pub fn emit_chunk_submitted(chunk: usize, size: usize, stored: usize) {
    info!(
        event = "events.chunk_submitted",
        chunk = chunk,
        size = size,
        stored = stored,
    );
}
