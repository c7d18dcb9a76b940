use filesync_core::{
    DecisionKind, DecisionReason, DirectorySnapshot, FileRecord, ModTime, NameFilter, SyncConfig,
    SyncDecision,
};
use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

#[test]
fn test_mod_time_lexicographic_order() {
    let times = [
        ModTime::new(5, 0),
        ModTime::new(4, 999_999_999),
        ModTime::new(5, 1),
        ModTime::new(-1, 500),
    ];

    let mut sorted = times.to_vec();
    sorted.sort();

    assert_eq!(
        sorted,
        vec![
            ModTime::new(-1, 500),
            ModTime::new(4, 999_999_999),
            ModTime::new(5, 0),
            ModTime::new(5, 1),
        ]
    );
}

#[test]
fn test_mod_time_equal_is_not_newer() {
    let a = ModTime::new(100, 42);
    let b = ModTime::new(100, 42);

    assert!(!a.is_newer_than(&b));
    assert!(!b.is_newer_than(&a));
}

#[test]
fn test_mod_time_display() {
    assert_eq!(ModTime::new(12, 5).to_string(), "12.000000005");
}

#[test]
fn test_mod_time_round_trips_system_time() {
    let time = UNIX_EPOCH + Duration::new(1_650_000_000, 987_654_321);
    let mtime = ModTime::from_system_time(time);

    assert_eq!(mtime.secs, 1_650_000_000);
    assert_eq!(mtime.nanos, 987_654_321);
}

#[test]
fn test_snapshot_sort_keeps_records_intact() {
    let mut snapshot = DirectorySnapshot::new(
        PathBuf::from("/src"),
        vec![
            FileRecord::new("zeta", ModTime::new(3, 0), 30),
            FileRecord::new("alpha", ModTime::new(1, 0), 10),
            FileRecord::new("mid", ModTime::new(2, 0), 20),
        ],
        Vec::new(),
        Duration::ZERO,
    );

    assert!(!snapshot.is_sorted());
    snapshot.sort_by_name();

    let pairs: Vec<_> = snapshot
        .files
        .iter()
        .map(|f| (f.name.as_str(), f.size))
        .collect();
    assert_eq!(pairs, vec![("alpha", 10), ("mid", 20), ("zeta", 30)]);
    assert_eq!(snapshot.total_size(), 60);
}

#[test]
fn test_snapshot_sort_is_not_locale_aware() {
    let mut snapshot = DirectorySnapshot::empty("/src");
    snapshot.files = ["b", "a", "Z", "é", "_"]
        .iter()
        .map(|n| FileRecord::new(*n, ModTime::new(0, 0), 0))
        .collect();

    snapshot.sort_by_name();

    let names: Vec<_> = snapshot.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Z", "_", "a", "b", "é"]);
}

#[test]
fn test_decision_variants() {
    let src = FileRecord::new("a.txt", ModTime::new(2, 0), 1);
    let dst = FileRecord::new("a.txt", ModTime::new(1, 0), 1);

    let update = SyncDecision::new(DecisionReason::SourceNewer, src.clone(), Some(dst.clone()));
    assert_eq!(update.kind, DecisionKind::Update);
    assert_eq!(update.to_string(), "UPDATE a.txt: source newer; updating");

    let skip = SyncDecision::new(DecisionReason::DestinationNewer, src, Some(dst));
    assert_eq!(skip.kind, DecisionKind::Skip);
    assert_eq!(skip.reason.to_string(), "destination newer; skipping");
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: SyncConfig =
        serde_json::from_str(r#"{"source": "/in", "destination": "/out"}"#).unwrap();

    assert_eq!(config.source, PathBuf::from("/in"));
    assert!(!config.dry_run);
    assert!(config.preserve_times);
    assert!(config.create_destination);
    assert!(config.include_hidden);
    assert!(config.ignore_patterns.is_empty());
    assert_eq!(config.buffer_size, filesync_core::DEFAULT_BUFFER_SIZE);
}

#[test]
fn test_config_name_filter() {
    let mut config = SyncConfig::new("/in", "/out");
    config.ignore_patterns = vec!["*.bak".to_string()];
    config.include_hidden = false;

    let filter: NameFilter = config.name_filter().unwrap();

    assert!(filter.excludes("old.bak"));
    assert!(filter.excludes(".env"));
    assert!(!filter.excludes("main.rs"));
}
