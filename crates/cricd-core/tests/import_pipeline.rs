//! End-to-end import tests against in-memory collaborators.
//!
//! Each test copies a scorecard into a fresh import directory and runs the
//! full file pipeline: parse, match creation, innings traversal, chunked
//! submission and completion marking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cricd_core::fakes::{MemoryEntityBackend, MemoryEventSink, MemoryMatchRegistry};
use cricd_core::{
    BallEvent, CachingResolver, EntityKind, EventOutcome, EventType, FileImporter, ImportConfig,
    IngestError,
};

const T20_SHORT: &str = include_str!("fixtures/t20_short.yaml");

struct Harness {
    _dir: tempfile::TempDir,
    import_dir: PathBuf,
    resolver: Arc<CachingResolver<MemoryEntityBackend>>,
    matches: Arc<MemoryMatchRegistry>,
    sink: Arc<MemoryEventSink>,
    importer: FileImporter,
}

fn harness_with(
    backend: MemoryEntityBackend,
    matches: MemoryMatchRegistry,
    sink: MemoryEventSink,
    chunk_size: usize,
) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let import_dir = dir.path().to_path_buf();
    let resolver = Arc::new(CachingResolver::new(backend));
    let matches = Arc::new(matches);
    let sink = Arc::new(sink);
    let importer = FileImporter::new(
        ImportConfig::new(&import_dir).with_chunk_size(chunk_size),
        resolver.clone(),
        matches.clone(),
        sink.clone(),
    );
    Harness {
        _dir: dir,
        import_dir,
        resolver,
        matches,
        sink,
        importer,
    }
}

fn harness() -> Harness {
    harness_with(
        MemoryEntityBackend::new(),
        MemoryMatchRegistry::new(),
        MemoryEventSink::new(),
        60,
    )
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write scorecard");
    path
}

fn positions(events: &[BallEvent]) -> Vec<(u32, u32, u32, u32)> {
    events
        .iter()
        .map(|e| (e.ball.innings, e.ball.over, e.ball.delivery, e.ball.ball))
        .collect()
}

#[tokio::test]
async fn test_import_produces_ordered_events_and_completes_file() {
    let h = harness();
    let file = write_file(&h.import_dir, "1001.yaml", T20_SHORT);

    let report = h.importer.process_file(&file).await.expect("import");

    assert_eq!(report.total_events, 8);
    assert_eq!(report.match_id.as_str(), "match-1");
    assert!(!file.exists());
    assert!(report.completed_path.exists());
    assert!(report
        .completed_path
        .to_string_lossy()
        .ends_with("1001.yaml.complete"));

    let events = h.sink.events();
    assert_eq!(
        positions(&events),
        vec![
            (1, 0, 1, 1),
            (1, 0, 2, 2),
            (1, 0, 3, 2),
            (1, 0, 4, 3),
            (1, 0, 5, 4),
            (1, 1, 1, 1),
            (2, 0, 1, 1),
            (2, 0, 2, 1),
        ]
    );
}

#[tokio::test]
async fn test_event_types_and_fields() {
    let h = harness();
    let file = write_file(&h.import_dir, "1001.yaml", T20_SHORT);
    h.importer.process_file(&file).await.expect("import");

    let events = h.sink.events();
    let kinds: Vec<_> = events.iter().map(BallEvent::event_type).collect();
    assert_eq!(
        kinds,
        vec![
            EventType::Delivery,
            EventType::Wide,
            EventType::Delivery,
            EventType::Caught,
            EventType::Delivery,
            EventType::LegBye,
            EventType::NoBall,
            EventType::RunOut,
        ]
    );

    assert_eq!(events[0].outcome, EventOutcome::Delivery { runs: 4 });
    assert_eq!(events[1].outcome, EventOutcome::Wide { runs: 0 });
    // Finch faces 0.5 after Wade is caught at 0.4 with Finch at the other end.
    assert_eq!(events[3].outcome, EventOutcome::Caught { did_cross: true });
    assert_eq!(events[5].outcome, EventOutcome::LegBye { runs: 2 });
    assert_eq!(events[6].outcome, EventOutcome::NoBall { runs: 2 });

    let cache = h.resolver.cache();
    let tharanga = cache.get(EntityKind::Player, "WU Tharanga");
    assert_eq!(
        events[7].outcome,
        EventOutcome::RunOut {
            runs: 0,
            batsman: tharanga
        }
    );
    assert_eq!(events[7].fielder, cache.get(EntityKind::Player, "AJ Finch"));
}

#[tokio::test]
async fn test_match_record_and_sides() {
    let h = harness();
    let file = write_file(&h.import_dir, "1001.yaml", T20_SHORT);
    h.importer.process_file(&file).await.expect("import");

    let matches = h.matches.matches();
    assert_eq!(matches.len(), 1);
    let record = &matches[0];
    assert_eq!(record.details.location.as_deref(), Some("Melbourne"));
    assert_eq!(record.details.number_of_innings, 1);
    assert_eq!(record.details.number_of_overs, Some(20));
    assert_eq!(record.umpires.len(), 2);

    let cache = h.resolver.cache();
    let australia = cache.get(EntityKind::Team, "Australia").expect("home");
    let sri_lanka = cache.get(EntityKind::Team, "Sri Lanka").expect("away");
    assert_eq!(record.home_team, australia);
    assert_eq!(record.away_team, sri_lanka);

    let events = h.sink.events();
    assert_eq!(events[0].ball.batting_team, australia);
    assert_eq!(events[0].ball.fielding_team, sri_lanka);
    assert_eq!(events[7].ball.batting_team, sri_lanka);
    assert_eq!(events[0].timestamp.to_string(), "2017-02-17");
}

#[tokio::test]
async fn test_players_created_once_across_innings() {
    let h = harness();
    let file = write_file(&h.import_dir, "1001.yaml", T20_SHORT);
    h.importer.process_file(&file).await.expect("import");

    let creations = h.resolver.backend().creations();
    let finch = creations
        .iter()
        .filter(|c| c.kind == EntityKind::Player && c.name == "AJ Finch")
        .count();
    assert_eq!(finch, 1);

    let mut names: Vec<_> = creations.iter().map(|c| (c.kind, c.name.clone())).collect();
    let total = names.len();
    names.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.as_str().cmp(b.0.as_str())));
    names.dedup();
    assert_eq!(names.len(), total, "duplicate creation: {names:?}");
}

#[tokio::test]
async fn test_events_are_chunked() {
    let h = harness_with(
        MemoryEntityBackend::new(),
        MemoryMatchRegistry::new(),
        MemoryEventSink::new(),
        3,
    );
    let file = write_file(&h.import_dir, "1001.yaml", T20_SHORT);
    h.importer.process_file(&file).await.expect("import");

    let sizes: Vec<_> = h.sink.batches().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 3, 2]);
}

#[tokio::test]
async fn test_unclassifiable_wicket_leaves_file_in_place() {
    let h = harness();
    let broken = T20_SHORT.replace("kind: run out", "kind: retired not out");
    let file = write_file(&h.import_dir, "1002.yaml", &broken);

    let err = h.importer.process_file(&file).await.unwrap_err();

    match err {
        IngestError::UnclassifiableWicket { kind } => assert_eq!(kind, "retired not out"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(file.exists());
    assert!(h.sink.batches().is_empty());
}

#[tokio::test]
async fn test_resolution_failure_aborts_file() {
    let h = harness_with(
        MemoryEntityBackend::new().failing_on("SL Malinga"),
        MemoryMatchRegistry::new(),
        MemoryEventSink::new(),
        60,
    );
    let file = write_file(&h.import_dir, "1003.yaml", T20_SHORT);

    let err = h.importer.process_file(&file).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::EntityResolution {
            kind: EntityKind::Player,
            ..
        }
    ));
    assert!(file.exists());
    // Teams and umpires created before the failure are kept.
    assert!(h.resolver.cache().get(EntityKind::Team, "Australia").is_some());
}

#[tokio::test]
async fn test_match_creation_failure_aborts_file() {
    let h = harness_with(
        MemoryEntityBackend::new(),
        MemoryMatchRegistry::failing(),
        MemoryEventSink::new(),
        60,
    );
    let file = write_file(&h.import_dir, "1004.yaml", T20_SHORT);

    let err = h.importer.process_file(&file).await.unwrap_err();

    assert!(matches!(err, IngestError::MatchCreation { .. }));
    assert!(file.exists());
}

#[tokio::test]
async fn test_submission_failure_keeps_earlier_chunks() {
    let h = harness_with(
        MemoryEntityBackend::new(),
        MemoryMatchRegistry::new(),
        MemoryEventSink::new().failing_on_batch(1),
        3,
    );
    let file = write_file(&h.import_dir, "1005.yaml", T20_SHORT);

    let err = h.importer.process_file(&file).await.unwrap_err();

    assert!(matches!(err, IngestError::Submission { .. }));
    assert_eq!(h.sink.batches().len(), 1);
    assert!(file.exists());
}

#[tokio::test]
async fn test_import_all_scans_yaml_only_and_continues_past_failures() {
    let h = harness();
    write_file(&h.import_dir, "b.yaml", T20_SHORT);
    write_file(&h.import_dir, "a.yaml", "info: [not, a, map]\n");
    write_file(&h.import_dir, "c.yaml.complete", T20_SHORT);
    write_file(&h.import_dir, "notes.txt", "ignore me");

    let scanned = h.importer.scan().await.expect("scan");
    let names: Vec<_> = scanned
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.yaml", "b.yaml"]);

    let summary = h.importer.import_all().await.expect("import_all");
    assert_eq!(summary.imported.len(), 1);
    assert_eq!(summary.failed, vec![h.import_dir.join("a.yaml")]);
    assert!(h.import_dir.join("a.yaml").exists());
    assert!(h.import_dir.join("b.yaml.complete").exists());
}
