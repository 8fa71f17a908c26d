//! Error taxonomy for delivery normalisation and file import.

use crate::domain::EntityKind;

/// Boxed error returned by an external collaborator (entity backend, match
/// registry, event sink). Carried unchanged as the `source` of the
/// corresponding [`IngestError`] variant.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while turning a scorecard into ball events.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("name is required for {role}")]
    MissingRequiredName { role: &'static str },

    #[error("unclassifiable wicket kind: {kind}")]
    UnclassifiableWicket { kind: String },

    #[error("extras record at {position} has no recognised field")]
    UnclassifiableExtras { position: String },

    #[error("invalid delivery position: {0:?}")]
    InvalidPosition(String),

    #[error("innings team {team:?} matches neither {home:?} nor {away:?}")]
    UnknownBattingTeam {
        team: String,
        home: String,
        away: String,
    },

    #[error("failed to resolve {kind} {name:?}: {source}")]
    EntityResolution {
        kind: EntityKind,
        name: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("match creation failed: {source}")]
    MatchCreation {
        #[source]
        source: CollaboratorError,
    },

    #[error("event submission failed: {source}")]
    Submission {
        #[source]
        source: CollaboratorError,
    },

    #[error("scorecard error: {0}")]
    Scorecard(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for IngestError {
    fn from(err: serde_yaml::Error) -> Self {
        IngestError::Scorecard(err.to_string())
    }
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
