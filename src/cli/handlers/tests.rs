use super::edit::append_line;
use super::list::{category_counts, write_list};
use super::transfer::export_target;
use super::*;
use crate::domain::{NoteDraft, NoteId};
use crate::editor::{EditorConfig, SaveStatus};
use crate::store::{MemoryStorage, NoteStore};
use crate::view::{ListFilter, NoteListView};
use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::io::Cursor;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// Test helpers
fn test_config() -> EditorConfig {
    EditorConfig {
        autosave_delay: Duration::from_millis(1000),
        safety_net_interval: Duration::from_secs(30),
    }
}

fn seeded_store(titles: &[&str]) -> NoteStore<MemoryStorage> {
    let mut store = NoteStore::init(MemoryStorage::new()).unwrap();
    store.merge_all(titles.iter().map(|t| NoteDraft::new(*t)).collect());
    store
}

fn session_with(titles: &[&str], start: Instant) -> Session<MemoryStorage> {
    Session::new(seeded_store(titles), test_config(), start)
}

fn run(session: &mut Session<MemoryStorage>, line: &str, now: Instant) -> String {
    let mut out = Vec::new();
    session.execute(line, &mut out, now).unwrap();
    String::from_utf8(out).unwrap()
}

fn tick(session: &mut Session<MemoryStorage>, now: Instant) -> String {
    let mut out = Vec::new();
    session.tick(&mut out, now).unwrap();
    String::from_utf8(out).unwrap()
}

// ===========================================
// truncate_str tests
// ===========================================

#[test]
fn truncate_str_short_string_unchanged() {
    assert_eq!(truncate_str("hello", 10), "hello");
}

#[test]
fn truncate_str_long_string_gets_ellipsis() {
    assert_eq!(truncate_str("hello world", 8), "hello...");
}

#[test]
fn truncate_str_counts_characters() {
    assert_eq!(truncate_str("héllo wörld", 11), "héllo wörld");
}

// ===========================================
// append_line tests
// ===========================================

#[test]
fn append_line_to_empty_content() {
    assert_eq!(append_line("", "first"), "first");
}

#[test]
fn append_line_adds_newline() {
    assert_eq!(append_line("one", "two"), "one\ntwo");
    assert_eq!(append_line("one\n", "two"), "one\ntwo");
}

// ===========================================
// list rendering tests
// ===========================================

#[test]
fn category_counts_follow_category_order() {
    let mut store = NoteStore::init(MemoryStorage::new()).unwrap();
    store.merge_all(vec![
        NoteDraft::new("a").category("Work"),
        NoteDraft::new("b").category("Home"),
        NoteDraft::new("c").category("Work"),
    ]);

    let counts: Vec<(String, usize)> = category_counts(store.list(), store.categories())
        .into_iter()
        .map(|c| (c.name, c.count))
        .collect();
    assert_eq!(
        counts,
        vec![("Work".to_string(), 2), ("Home".to_string(), 1)]
    );
}

#[test]
fn write_list_marks_active_and_prints_count() {
    let store = seeded_store(&["First", "Second"]);
    let active = store.list()[1].id();
    let view = NoteListView::build(store.list(), &ListFilter::new(), Some(active), Utc::now());

    let mut out = Vec::new();
    write_list(&mut out, &view).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains(&format!("* #{active}")));
    assert!(text.contains("No content"));
    assert!(text.trim_end().ends_with("(2 notes)"));
}

#[test]
fn write_list_prints_empty_state() {
    let view = NoteListView::build(&[], &ListFilter::new(), None, Utc::now());
    let mut out = Vec::new();
    write_list(&mut out, &view).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("No notes yet"));
}

#[test]
fn export_target_in_directory_uses_dated_name() {
    let dir = TempDir::new().unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    assert_eq!(
        export_target(dir.path(), date),
        dir.path().join("jotter-notes-2026-10-17.json")
    );

    let file = dir.path().join("out.json");
    assert_eq!(export_target(&file, date), file);
}

// ===========================================
// shell session tests
// ===========================================

#[test]
fn shell_edits_autosave_after_quiet_period() {
    let t0 = Instant::now();
    let mut session = session_with(&[], t0);

    run(&mut session, "new", t0);
    run(&mut session, "title Groceries", t0);
    run(&mut session, "body milk\\neggs", t0 + Duration::from_millis(400));

    assert_eq!(tick(&mut session, t0 + Duration::from_millis(1200)), "");
    assert_eq!(tick(&mut session, t0 + Duration::from_millis(1400)), "[auto-saved]\n");

    let note = session.store().active().unwrap();
    assert_eq!(note.title(), "Groceries");
    assert_eq!(note.content(), "milk\neggs");
    assert_eq!(session.editor().status(), &SaveStatus::Saved);
}

#[test]
fn shell_status_without_note() {
    let t0 = Instant::now();
    let mut session = session_with(&[], t0);
    assert_eq!(run(&mut session, "status", t0), "All changes saved\n");

    let out = run(&mut session, "title nope", t0);
    assert_eq!(out, "error: no note selected\n");
    assert_eq!(session.editor().status(), &SaveStatus::NoNoteSelected);
}

#[test]
fn shell_open_missing_note_reports_not_found() {
    let t0 = Instant::now();
    let mut session = session_with(&["Only"], t0);
    let out = run(&mut session, "open 99", t0);
    assert_eq!(out, "error: note not found: 99\n");
}

#[test]
fn shell_switching_flushes_dirty_buffer() {
    let t0 = Instant::now();
    let mut session = session_with(&["First", "Second"], t0);
    let first = session.store().list()[0].id();
    let second = session.store().list()[1].id();

    run(&mut session, &format!("open {first}"), t0);
    run(&mut session, "append more", t0);
    run(&mut session, &format!("open {second}"), t0);

    assert_eq!(session.store().get(first).unwrap().content(), "more");
    assert_eq!(session.editor().bound_id(), Some(second));
    assert!(!session.editor().has_unsaved_changes());
}

#[test]
fn shell_search_filters_list() {
    let t0 = Instant::now();
    let mut session = session_with(&["Alpha", "Beta"], t0);

    let out = run(&mut session, "search alp", t0);
    assert!(out.contains("Alpha"));
    assert!(!out.contains("Beta"));
    assert!(out.contains("(1 of 2 notes)"));

    let out = run(&mut session, "search zzz", t0);
    assert!(out.contains("No notes match your search criteria."));
}

#[test]
fn shell_key_chords_follow_focus() {
    let t0 = Instant::now();
    let mut session = session_with(&[], t0);

    let out = run(&mut session, "key ctrl+n", t0);
    assert!(out.starts_with("Created #"));

    run(&mut session, "title Draft", t0);
    let out = run(&mut session, "key cmd+s", t0);
    assert_eq!(out, "Saved\n");

    let out = run(&mut session, "key escape", t0);
    assert_eq!(out, "no action for 'escape' here\n");

    run(&mut session, "search draft", t0);
    run(&mut session, "focus search", t0);
    let out = run(&mut session, "key esc", t0);
    assert!(out.contains("(1 notes)"));
}

#[test]
fn shell_escape_clears_search_and_category() {
    let t0 = Instant::now();
    let mut store = NoteStore::init(MemoryStorage::new()).unwrap();
    store.merge_all(vec![
        NoteDraft::new("Standup").category("Meeting"),
        NoteDraft::new("Roadmap").category("Work"),
    ]);
    let mut session = Session::new(store, test_config(), t0);

    let out = run(&mut session, "filter Meeting", t0);
    assert!(out.contains("(1 of 2 notes)"));
    let out = run(&mut session, "search a", t0);
    assert!(out.contains("(1 of 2 notes)"));

    run(&mut session, "key ctrl+f", t0);
    let out = run(&mut session, "key escape", t0);
    assert!(out.contains("Standup"));
    assert!(out.contains("Roadmap"));
    assert!(out.contains("(2 notes)"));
}

#[test]
fn shell_markup_commands_edit_buffer() {
    let t0 = Instant::now();
    let mut session = session_with(&[], t0);
    run(&mut session, "new", t0);
    run(&mut session, "body make this loud", t0);

    let out = run(&mut session, "bold 10 14", t0);
    assert_eq!(out, "selected 10..18\n");
    assert_eq!(session.editor().buffer().content, "make this **loud**");

    let out = run(&mut session, "italic 3 3", t0);
    assert_eq!(out, "error: select text to format\n");
    assert_eq!(session.editor().buffer().content, "make this **loud**");
}

#[test]
fn shell_clear_requires_confirmation() {
    let t0 = Instant::now();
    let mut session = session_with(&["One", "Two"], t0);

    let out = run(&mut session, "clear", t0);
    assert!(out.contains("clear --yes"));
    assert_eq!(session.store().len(), 2);

    let out = run(&mut session, "clear --yes", t0);
    assert_eq!(out, "Deleted 2 notes\n");
    assert!(session.store().is_empty());
}

#[test]
fn shell_import_replace_detaches_bound_note() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("in.json");
    std::fs::write(&file, r#"{"notes": [{"title": "Imported"}]}"#).unwrap();

    let t0 = Instant::now();
    let mut session = session_with(&["Old"], t0);
    let old = session.store().list()[0].id();
    run(&mut session, &format!("open {old}"), t0);

    let out = run(&mut session, &format!("import {} --replace", file.display()), t0);
    assert_eq!(out, "Imported 1 notes (0 skipped, 1 total)\n");
    assert_eq!(session.editor().bound_id(), None);
    assert_eq!(session.store().list()[0].title(), "Imported");
}

#[test]
fn shell_unknown_command_is_reported() {
    let t0 = Instant::now();
    let mut session = session_with(&[], t0);
    assert_eq!(
        run(&mut session, "frobnicate", t0),
        "error: unknown command 'frobnicate'; type `help`\n"
    );
}

#[test]
fn run_shell_flushes_pending_edits_on_exit() {
    let t0 = Instant::now();
    let session = session_with(&[], t0);
    let input = Cursor::new("new\ntitle Unsaved on quit\nquit\nignored\n");
    let mut out = Vec::new();

    let elapsed = Cell::new(Duration::ZERO);
    let clock = || {
        elapsed.set(elapsed.get() + Duration::from_millis(1));
        t0 + elapsed.get()
    };

    let storage = run_shell(session, input, &mut out, clock).unwrap();
    let snapshot = storage.snapshot().unwrap();

    assert_eq!(snapshot.notes.len(), 1);
    assert_eq!(snapshot.notes[0].title(), "Unsaved on quit");
    assert!(!String::from_utf8(out).unwrap().contains("ignored"));
}

#[test]
fn run_shell_polls_between_lines() {
    let t0 = Instant::now();
    let session = session_with(&[], t0);
    let input = Cursor::new("new\ntitle Typed\nstatus\n");
    let mut out = Vec::new();

    let step = Cell::new(0u64);
    let clock = || {
        step.set(step.get() + 1);
        t0 + Duration::from_millis(400 * step.get())
    };

    run_shell(session, input, &mut out, clock).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[auto-saved]"), "output was: {text}");
}

#[test]
fn parse_id_accepts_hash_prefix() {
    let t0 = Instant::now();
    let mut session = session_with(&["Only"], t0);
    let id: NoteId = session.store().list()[0].id();
    let out = run(&mut session, &format!("open #{id}"), t0);
    assert!(out.starts_with("# Only"));
}
