use std::path::{Path, PathBuf};
use std::time::Duration;

use rustc_hash::FxHashMap;

use super::bindings::{Binding, TriggeredBindings, classify_path};
use super::debouncer::{DEBOUNCE_MS, Debouncer, REBUILD_COOLDOWN_MS};
use super::types::ChangeKind;
use crate::config::{Config, test_config_at};

fn make_config() -> Config {
    test_config_at(Path::new("/project"))
}

fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

// ============================================================================
// Debouncer
// ============================================================================

#[test]
fn test_debouncer_empty() {
    let debouncer = Debouncer::new();
    assert!(!debouncer.is_ready());
}

#[test]
fn test_event_routing_by_kind() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/a.css"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/b.js"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/c.css"], remove_kind()));

    assert_eq!(debouncer.changes.len(), 3);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.css")],
        ChangeKind::Created
    );
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/b.js")],
        ChangeKind::Modified
    );
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/c.css")],
        ChangeKind::Removed
    );
}

#[test]
fn test_metadata_change_ignored() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(
        vec!["/tmp/a.css"],
        notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
            notify::event::MetadataKind::Any,
        )),
    ));

    assert!(debouncer.changes.is_empty());
    assert!(debouncer.last_event.is_none());
}

#[test]
fn test_temp_file_ignored() {
    let mut debouncer = Debouncer::new();

    debouncer.add_event(&make_event(vec!["/tmp/real.css"], modify_kind()));
    assert!(debouncer.last_event.is_some());
    let first_time = debouncer.last_event.unwrap();

    std::thread::sleep(Duration::from_millis(5));

    // Temp file event — should NOT update last_event or add to changes
    debouncer.add_event(&make_event(vec!["/tmp/.main.css.swp"], modify_kind()));
    assert_eq!(debouncer.last_event.unwrap(), first_time);
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_dedup_first_event_wins() {
    let mut debouncer = Debouncer::new();

    // Same path: create then modify — first one (create) wins
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], create_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], modify_kind()));

    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.css")],
        ChangeKind::Created
    );
}

#[test]
fn test_dedup_same_event() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/tmp/a.css", "/tmp/a.css"], modify_kind()));
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_remove_then_create_restores() {
    let mut debouncer = Debouncer::new();

    // File removed, then restored (created) — should become Created
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], remove_kind()));
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.css")],
        ChangeKind::Removed
    );

    debouncer.add_event(&make_event(vec!["/tmp/a.css"], create_kind()));
    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.css")],
        ChangeKind::Created
    );
}

#[test]
fn test_create_then_remove_discards() {
    let mut debouncer = Debouncer::new();

    // File created, then removed — net no-op, should be discarded entirely
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], create_kind()));
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.css")],
        ChangeKind::Created
    );

    debouncer.add_event(&make_event(vec!["/tmp/a.css"], remove_kind()));
    assert!(
        debouncer.changes.is_empty(),
        "created+removed should discard"
    );
}

#[test]
fn test_modify_then_remove_upgrades() {
    let mut debouncer = Debouncer::new();

    // File modified, then removed — should upgrade to Removed
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], remove_kind()));
    assert_eq!(debouncer.changes.len(), 1);
    assert_eq!(
        debouncer.changes[&PathBuf::from("/tmp/a.css")],
        ChangeKind::Removed
    );
}

#[test]
fn test_take_not_ready_inside_debounce_window() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], modify_kind()));

    // Fresh event: the debounce window has not elapsed
    assert!(debouncer.take_if_ready().is_none());
    assert_eq!(debouncer.changes.len(), 1);
}

#[test]
fn test_take_if_ready_drains_and_stamps_run() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/tmp/a.css"], modify_kind()));
    // Backdate past the debounce window
    debouncer.last_event =
        Some(std::time::Instant::now() - Duration::from_millis(DEBOUNCE_MS + 50));

    let taken = debouncer.take_if_ready().expect("batch should be ready");
    assert_eq!(taken.len(), 1);
    assert!(debouncer.changes.is_empty());
    assert!(debouncer.last_run.is_some());
    assert!(debouncer.last_event.is_none());
}

#[test]
fn test_sleep_duration_no_events() {
    let debouncer = Debouncer::new();
    assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));
}

#[test]
fn test_sleep_duration_after_event() {
    let mut debouncer = Debouncer::new();
    debouncer.last_event = Some(std::time::Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= Duration::from_millis(DEBOUNCE_MS - 10));
    assert!(dur <= Duration::from_millis(DEBOUNCE_MS + 10));
}

#[test]
fn test_sleep_duration_respects_cooldown() {
    let mut debouncer = Debouncer::new();
    debouncer.last_event = Some(std::time::Instant::now());
    debouncer.last_run = Some(std::time::Instant::now());

    let dur = debouncer.sleep_duration();
    assert!(dur >= Duration::from_millis(REBUILD_COOLDOWN_MS - 10));
    assert!(dur <= Duration::from_millis(REBUILD_COOLDOWN_MS + 10));
}

// ============================================================================
// Bindings
// ============================================================================

#[test]
fn test_root_markup_is_markup_binding() {
    let config = make_config();
    assert_eq!(
        classify_path(Path::new("/project/index.html"), &config),
        Some(Binding::Markup)
    );
    assert_eq!(
        classify_path(Path::new("/project/about.html"), &config),
        Some(Binding::Markup)
    );
}

#[test]
fn test_nested_markup_is_not_bound() {
    let config = make_config();
    // Only html directly in the project root counts
    assert_eq!(classify_path(Path::new("/project/docs/index.html"), &config), None);
    assert_eq!(classify_path(Path::new("/project/app/index.html"), &config), None);
}

#[test]
fn test_source_files_are_sources_binding() {
    let config = make_config();
    assert_eq!(
        classify_path(Path::new("/project/app/styles/main.css"), &config),
        Some(Binding::Sources)
    );
    assert_eq!(
        classify_path(Path::new("/project/app/js/main.js"), &config),
        Some(Binding::Sources)
    );
    assert_eq!(
        classify_path(Path::new("/project/app/js/util.mjs"), &config),
        Some(Binding::Sources)
    );
}

#[test]
fn test_output_paths_never_bind() {
    let config = make_config();
    assert_eq!(classify_path(Path::new("/project/dist/main.css"), &config), None);
    assert_eq!(classify_path(Path::new("/project/dist/main.js"), &config), None);
}

#[test]
fn test_unrelated_paths_are_not_bound() {
    let config = make_config();
    // Wrong extension under the source tree
    assert_eq!(classify_path(Path::new("/project/app/js/notes.txt"), &config), None);
    // Right extension outside the source tree
    assert_eq!(classify_path(Path::new("/project/vendor/lib.js"), &config), None);
    // No extension at all
    assert_eq!(classify_path(Path::new("/project/app/styles/main"), &config), None);
}

#[test]
fn test_classify_groups_batch_by_binding() {
    let config = make_config();
    let mut raw = FxHashMap::default();
    raw.insert(PathBuf::from("/project/index.html"), ChangeKind::Modified);
    raw.insert(
        PathBuf::from("/project/app/styles/main.css"),
        ChangeKind::Modified,
    );
    raw.insert(PathBuf::from("/project/app/js/a.js"), ChangeKind::Created);
    raw.insert(PathBuf::from("/project/dist/main.css"), ChangeKind::Modified);

    let batch = TriggeredBindings::classify(raw, &config).expect("two bindings triggered");
    assert_eq!(batch.markup, vec![PathBuf::from("/project/index.html")]);
    assert_eq!(
        batch.sources,
        vec![
            PathBuf::from("/project/app/js/a.js"),
            PathBuf::from("/project/app/styles/main.css"),
        ]
    );
}

#[test]
fn test_classify_empty_when_nothing_bound() {
    let config = make_config();
    let mut raw = FxHashMap::default();
    raw.insert(PathBuf::from("/project/dist/main.css"), ChangeKind::Modified);
    raw.insert(PathBuf::from("/project/README.md"), ChangeKind::Modified);

    assert!(TriggeredBindings::classify(raw, &config).is_none());
}
