//! Scorecard file import.
//!
//! [`FileImporter`] takes one scorecard file from disk to the statistics API:
//!
//! 1. parse the scorecard
//! 2. extract match details
//! 3. resolve umpires
//! 4. resolve teams
//! 5. create the match
//! 6. build ball events, innings by innings
//! 7. submit events in chunks
//! 8. mark the file complete by renaming it
//!
//! Any failure stops the file where it is and leaves it in the import
//! directory for an operator to retry. Nothing is rolled back.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::domain::{BallEvent, EntityId, MatchContext};
use crate::error::{IngestError, Result};
use crate::innings::InningsIterator;
use crate::match_info::{extract_match_details, extract_teams, extract_umpires, NewMatch};
use crate::obs;
use crate::resolver::EntityResolver;
use crate::scorecard::Scorecard;
use crate::storage_traits::{submit_in_chunks, EventSink, MatchRegistry};

/// Events per submission; roughly ten overs.
pub const DEFAULT_CHUNK_SIZE: usize = 60;

/// Extension scorecard files carry.
pub const SCORECARD_EXTENSION: &str = "yaml";

/// Import settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Directory scanned for scorecards.
    pub import_dir: PathBuf,
    pub chunk_size: usize,
    /// Appended to a file name once it has been imported.
    pub completed_suffix: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            import_dir: PathBuf::from("import"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            completed_suffix: "complete".to_string(),
        }
    }
}

impl ImportConfig {
    pub fn new(import_dir: impl Into<PathBuf>) -> Self {
        ImportConfig {
            import_dir: import_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Outcome of a successful file import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub file: PathBuf,
    pub match_id: EntityId,
    pub total_events: usize,
    /// Where the file was moved after import.
    pub completed_path: PathBuf,
}

/// Tally for a batch of files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: Vec<ImportReport>,
    pub failed: Vec<PathBuf>,
}

/// Whether `path` looks like a scorecard waiting to be imported.
pub fn is_scorecard(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == SCORECARD_EXTENSION)
        .unwrap_or(false)
}

/// Imports scorecard files through the configured collaborators.
pub struct FileImporter {
    config: ImportConfig,
    resolver: Arc<dyn EntityResolver>,
    matches: Arc<dyn MatchRegistry>,
    sink: Arc<dyn EventSink>,
}

impl FileImporter {
    pub fn new(
        config: ImportConfig,
        resolver: Arc<dyn EntityResolver>,
        matches: Arc<dyn MatchRegistry>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config,
            resolver,
            matches,
            sink,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Scorecards directly under the import directory, sorted by name.
    pub async fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.config.import_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_file() && is_scorecard(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Import every scorecard currently in the import directory.
    ///
    /// A failing file is logged and skipped; the rest still run.
    pub async fn import_all(&self) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();
        for file in self.scan().await? {
            match self.process_file(&file).await {
                Ok(report) => summary.imported.push(report),
                Err(_) => summary.failed.push(file),
            }
        }
        Ok(summary)
    }

    /// Import one scorecard file.
    pub async fn process_file(&self, path: &Path) -> Result<ImportReport> {
        let name = path.display().to_string();
        let started = Instant::now();
        obs::emit_file_started(&name);

        let outcome = self
            .run_pipeline(path)
            .instrument(obs::import_span(&name))
            .await;
        match outcome {
            Ok(report) => {
                obs::emit_file_completed(
                    &name,
                    report.total_events,
                    started.elapsed().as_millis() as u64,
                );
                Ok(report)
            }
            Err(err) => {
                obs::emit_file_failed(&name, &err);
                Err(err)
            }
        }
    }

    async fn run_pipeline(&self, path: &Path) -> Result<ImportReport> {
        let source = tokio::fs::read_to_string(path).await?;
        let scorecard = Scorecard::from_yaml_str(&source)?;

        let details = extract_match_details(&scorecard.info, scorecard.innings.len())?;
        let umpires = extract_umpires(&scorecard.info, self.resolver.as_ref()).await?;
        let (home, away) = extract_teams(&scorecard.info, self.resolver.as_ref()).await?;

        let record = NewMatch {
            details,
            umpires,
            home_team: home.id.clone(),
            away_team: away.id.clone(),
        };
        let match_id = self
            .matches
            .create_match(&record)
            .await
            .map_err(|source| IngestError::MatchCreation { source })?;

        let context = MatchContext {
            match_id: match_id.clone(),
            start_date: record.details.start_date,
            home,
            away,
        };
        let events = self.build_events(&scorecard, &context).await?;

        submit_in_chunks(self.sink.as_ref(), &events, self.config.chunk_size).await?;
        let completed_path = self.complete_file(path).await?;

        Ok(ImportReport {
            file: path.to_path_buf(),
            match_id,
            total_events: events.len(),
            completed_path,
        })
    }

    /// Events for every innings, innings in file order.
    pub async fn build_events(
        &self,
        scorecard: &Scorecard,
        context: &MatchContext,
    ) -> Result<Vec<BallEvent>> {
        let iterator = InningsIterator::new(context, self.resolver.as_ref());
        let mut events = Vec::new();
        for (index, innings) in scorecard.innings.iter().enumerate() {
            let number = index as u32 + 1;
            events.extend(iterator.process(&innings.record, number).await?);
        }
        Ok(events)
    }

    /// Rename `path` to `<path>.<completed_suffix>`.
    pub async fn complete_file(&self, path: &Path) -> Result<PathBuf> {
        let mut target: OsString = path.as_os_str().to_owned();
        target.push(".");
        target.push(&self.config.completed_suffix);
        let target = PathBuf::from(target);

        tokio::fs::rename(path, &target).await?;
        Ok(target)
    }
}
