//! Orchestrator scenario tests for triptych.
//!
//! Drive [AppState] through key events against temporary directories, with fake
//! external tools so no real binary is spawned.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::{TempDir, tempdir};
use triptych::app::{AppState, PreviewView};
use triptych::config::Config;
use triptych::core::error::{FmError, FmResult};
use triptych::core::kind::EntryKind;
use triptych::core::proc::{Archiver, Highlighter, Opener, Transcoder};
use triptych::core::worker::PreviewTools;

struct PngTranscoder;
impl Transcoder for PngTranscoder {
    fn transcode(&self, _: &Path, _: EntryKind) -> FmResult<Vec<u8>> {
        Ok(b"\x89PNG fake frame".to_vec())
    }
}

struct Echo;
impl Highlighter for Echo {
    fn highlight(&self, path: &Path, _: usize) -> FmResult<Vec<String>> {
        Ok(vec![format!("hl:{}", path.display())])
    }
    fn name(&self) -> &str {
        "echo"
    }
}

struct NoArchiver;
impl Archiver for NoArchiver {
    fn archive(&self, _: &Path, _: &[String], _: &str) -> FmResult<()> {
        Err(FmError::ToolMissing("zip".into()))
    }
}

struct NoOpener;
impl Opener for NoOpener {
    fn open(&self, _: &Path, _: EntryKind) -> FmResult<()> {
        Ok(())
    }
}

fn config(state_dir: &TempDir) -> Config {
    Config::default().with_pins_file(state_dir.path().join("pins"))
}

fn app<'a>(cfg: &'a Config, dir: &Path) -> Result<AppState<'a>, Box<dyn std::error::Error>> {
    let tools = PreviewTools::new(Arc::new(PngTranscoder), vec![Arc::new(Echo) as Arc<dyn Highlighter>]);
    Ok(AppState::with_tools(
        cfg,
        dir,
        tools,
        Box::new(NoArchiver),
        Box::new(NoOpener),
    )?)
}

fn press(app: &mut AppState, keys: &str) {
    for c in keys.chars() {
        app.handle_keypress(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
}

fn key(app: &mut AppState, code: KeyCode) {
    app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Ticks until `done` holds or a few seconds pass.
fn tick_until(app: &mut AppState, done: impl Fn(&AppState) -> bool) -> bool {
    for _ in 0..500 {
        app.tick();
        if done(app) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_rename_while_selected_drops_old_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let state_dir = tempdir()?;
    fs::write(dir.path().join("notes.txt"), "n")?;
    fs::write(dir.path().join("other.txt"), "o")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, dir.path())?;

    // Select notes.txt (auto-advance moves to other.txt), then come back to it.
    press(&mut app, " ");
    press(&mut app, "k");
    assert!(app.nav().is_selected(&dir.path().join("notes.txt")));

    press(&mut app, "r");
    for _ in 0.."notes.txt".len() {
        key(&mut app, KeyCode::Backspace);
    }
    press(&mut app, "notes-v2.txt");
    key(&mut app, KeyCode::Enter);

    assert!(dir.path().join("notes-v2.txt").exists());
    assert!(!app.nav().is_selected(&dir.path().join("notes.txt")));
    assert!(app.nav().selected().is_empty());
    assert_eq!(app.nav().current_entry().map(|e| e.name()), Some("notes-v2.txt"));
    Ok(())
}

#[test]
fn test_copy_paste_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let state_dir = tempdir()?;
    for d in ["a", "b", "c"] {
        fs::create_dir(root.path().join(d))?;
    }
    fs::write(root.path().join("a").join("doc.txt"), "doc")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, &root.path().join("a"))?;

    press(&mut app, "y");
    assert_eq!(app.status(), Some("Yanked 1 items"));

    // a -> root (cursor back on a) -> b
    press(&mut app, "hjl");
    assert_eq!(app.nav().current_dir(), root.path().join("b"));
    press(&mut app, "p");
    assert_eq!(app.status(), Some("Pasted 1 items"));

    press(&mut app, "hjl");
    assert_eq!(app.nav().current_dir(), root.path().join("c"));
    press(&mut app, "p");
    assert_eq!(app.status(), Some("Pasted 1 items"));
    assert!(!app.clipboard().is_empty());

    press(&mut app, "p");
    assert_eq!(app.status(), Some("Pasted 0 items, 1 skipped"));
    assert!(root.path().join("a").join("doc.txt").exists());
    Ok(())
}

#[test]
fn test_second_paste_after_cut_reports_empty() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let state_dir = tempdir()?;
    fs::create_dir(root.path().join("dst"))?;
    fs::write(root.path().join("move.txt"), "m")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, root.path())?;

    // Catalog: dst/, move.txt
    press(&mut app, "jx");
    assert_eq!(app.status(), Some("Cut 1 items"));
    press(&mut app, "kl");
    press(&mut app, "p");
    assert_eq!(app.status(), Some("Pasted 1 items"));
    assert!(root.path().join("dst").join("move.txt").exists());
    assert!(!root.path().join("move.txt").exists());

    press(&mut app, "p");
    assert_eq!(app.status(), Some("Clipboard empty"));
    Ok(())
}

#[test]
fn test_selection_cleared_after_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let state_dir = tempdir()?;
    fs::create_dir(root.path().join("sub"))?;
    fs::write(root.path().join("f1"), "")?;
    fs::write(root.path().join("f2"), "")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, root.path())?;

    press(&mut app, "a");
    assert_eq!(app.nav().selected().len(), 3);
    press(&mut app, "lh");
    assert!(app.nav().selected().is_empty());
    assert_eq!(app.nav().current_entry().map(|e| e.name()), Some("sub"));
    Ok(())
}

#[test]
fn test_text_preview_is_fresh_only_for_selection() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let state_dir = tempdir()?;
    fs::write(root.path().join("a.rs"), "fn a() {}")?;
    fs::write(root.path().join("b.rs"), "fn b() {}")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, root.path())?;

    let a = root.path().join("a.rs");
    let expected = format!("hl:{}", a.display());
    assert!(tick_until(&mut app, |app| matches!(
        app.preview_view(),
        PreviewView::Lines(lines) if lines == [expected.clone()]
    )));

    press(&mut app, "j");
    assert!(app.fresh_slot().is_none());
    assert!(matches!(app.preview_view(), PreviewView::Loading));

    assert!(tick_until(&mut app, |app| app
        .fresh_slot()
        .is_some_and(|s| s.path == root.path().join("b.rs"))));

    app.on_resize();
    assert!(app.fresh_slot().is_none());
    Ok(())
}

#[test]
fn test_image_placement_follows_selection() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let state_dir = tempdir()?;
    fs::write(root.path().join("a.png"), "not really a png")?;
    fs::write(root.path().join("b.dat"), "plain")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, root.path())?;

    assert!(tick_until(&mut app, |app| app.image_placement().is_some()));
    let (generation, payload, _) = app.image_placement().ok_or("no placement")?;
    assert!(generation > 0);
    assert!(!payload.is_empty());

    // A raw file is previewed inline and never places an image.
    press(&mut app, "j");
    app.tick();
    assert!(app.image_placement().is_none());
    assert!(matches!(app.preview_view(), PreviewView::Lines(lines) if lines == ["plain"]));
    Ok(())
}

#[test]
fn test_directory_preview_lists_children() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let state_dir = tempdir()?;
    fs::create_dir_all(root.path().join("sub").join("inner"))?;
    fs::write(root.path().join("sub").join("leaf.txt"), "")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, root.path())?;

    assert!(app.tick());
    match app.preview_view() {
        PreviewView::Listing(entries) => {
            let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
            assert_eq!(names, ["inner", "leaf.txt"]);
        }
        _ => return Err("expected a directory listing".into()),
    }
    Ok(())
}

#[test]
fn test_hidden_toggle_and_zip_failure_status() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let state_dir = tempdir()?;
    fs::write(root.path().join(".secret"), "")?;
    fs::write(root.path().join("shown"), "")?;
    let cfg = config(&state_dir);
    let mut app = app(&cfg, root.path())?;

    assert_eq!(app.nav().entries().len(), 1);
    press(&mut app, ".");
    assert_eq!(app.status(), Some("Showing hidden files"));
    assert_eq!(app.nav().entries().len(), 2);

    press(&mut app, "z");
    press(&mut app, "out");
    key(&mut app, KeyCode::Enter);
    assert_eq!(app.status(), Some("Zip failed: zip is not installed"));
    Ok(())
}
