mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use containerconf::drivers::{DriverRepository, FsDriverRepository};
use containerconf::ui::app::App;
use containerconf::ui::drivers::{
    DriverManagerIntent, DriverManagerReducer, DriverManagerState, OperationResult,
};
use containerconf::ui::input::{handle_key, handle_paste};
use containerconf::ui::mvi::Reducer;

use common::{driver_package, temp_driver_root, write_zip};

fn loaded(drivers: &[&str]) -> DriverManagerState {
    DriverManagerReducer::reduce(
        DriverManagerState::default(),
        DriverManagerIntent::Load {
            drivers: drivers.iter().map(|d| d.to_string()).collect(),
        },
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        handle_key(app, key(KeyCode::Char(ch)));
    }
}

// ============================================================================
// Reducer
// ============================================================================

#[test]
fn load_shows_list_with_first_focused() {
    let state = loaded(&["A", "B"]);
    assert!(state.is_visible());
    assert_eq!(state.drivers(), ["A".to_string(), "B".to_string()]);
    assert_eq!(state.focused_driver(), Some("A"));
    assert!(state.last_result().is_none());
}

#[test]
fn focus_wraps() {
    let state = DriverManagerReducer::reduce(loaded(&["A", "B", "C"]), DriverManagerIntent::MoveUp);
    assert_eq!(state.focused_driver(), Some("C"));
    let state = DriverManagerReducer::reduce(state, DriverManagerIntent::MoveDown);
    assert_eq!(state.focused_driver(), Some("A"));
}

#[test]
fn empty_list_has_no_delete_target() {
    let state = DriverManagerReducer::reduce(loaded(&[]), DriverManagerIntent::RequestDelete);
    assert!(state.pending_delete().is_none());
    assert!(state.focused_driver().is_none());
}

#[test]
fn delete_request_can_be_cancelled() {
    let state = DriverManagerReducer::reduce(loaded(&["A", "B"]), DriverManagerIntent::MoveDown);
    let state = DriverManagerReducer::reduce(state, DriverManagerIntent::RequestDelete);
    assert_eq!(state.pending_delete(), Some("B"));

    // Navigation is frozen while the confirmation is up.
    let state = DriverManagerReducer::reduce(state, DriverManagerIntent::MoveUp);
    assert_eq!(state.focused_driver(), Some("B"));

    let state = DriverManagerReducer::reduce(state, DriverManagerIntent::CancelDelete);
    assert!(state.pending_delete().is_none());
    assert_eq!(state.drivers().len(), 2);
}

#[test]
fn import_prompt_collects_text() {
    let state = DriverManagerReducer::reduce(loaded(&[]), DriverManagerIntent::OpenImport);
    assert_eq!(state.import_path(), Some(""));
    let state = [
        DriverManagerIntent::ImportChar('/'),
        DriverManagerIntent::ImportChar('x'),
        DriverManagerIntent::ImportChar('y'),
        DriverManagerIntent::ImportBackspace,
    ]
    .into_iter()
    .fold(state, DriverManagerReducer::reduce);
    assert_eq!(state.import_path(), Some("/x"));

    let state = DriverManagerReducer::reduce(state, DriverManagerIntent::CancelImport);
    assert!(state.import_path().is_none());
}

#[test]
fn finished_replaces_list_and_clamps_focus() {
    let state = DriverManagerReducer::reduce(loaded(&["A", "B", "C"]), DriverManagerIntent::MoveUp);
    let state = DriverManagerReducer::reduce(state, DriverManagerIntent::RequestDelete);
    let state = DriverManagerReducer::reduce(
        state,
        DriverManagerIntent::Finished {
            result: OperationResult::Removed("C".to_string()),
            drivers: vec!["A".to_string(), "B".to_string()],
        },
    );
    assert_eq!(state.focused_driver(), Some("B"));
    assert!(state.pending_delete().is_none());
    let result = state.last_result().unwrap();
    assert!(result.is_success());
    assert_eq!(result.message(), "Removed driver: C");
}

#[test]
fn hidden_state_ignores_everything_but_load() {
    let state = DriverManagerReducer::reduce(DriverManagerState::Hidden, DriverManagerIntent::MoveDown);
    assert_eq!(state, DriverManagerState::Hidden);
    let state = DriverManagerReducer::reduce(
        state,
        DriverManagerIntent::Finished {
            result: OperationResult::Installed("x".to_string()),
            drivers: vec!["x".to_string()],
        },
    );
    assert_eq!(state, DriverManagerState::Hidden);
}

// ============================================================================
// App against a real repository
// ============================================================================

#[test]
fn app_lists_installed_drivers() {
    let (temp_dir, root) = temp_driver_root();
    let repo = FsDriverRepository::new(&root);
    repo.import(&driver_package(temp_dir.path(), "a.zip", "Alpha")).unwrap();
    repo.import(&driver_package(temp_dir.path(), "b.zip", "Beta")).unwrap();

    let app = App::driver_manager(Box::new(repo));

    assert_eq!(
        app.driver_manager_state().drivers(),
        ["Alpha".to_string(), "Beta".to_string()]
    );
    assert!(!app.should_quit());
}

#[test]
fn import_through_prompt_installs_and_reports() {
    let (temp_dir, root) = temp_driver_root();
    let archive = driver_package(temp_dir.path(), "turnip.zip", "Turnip-25");
    let mut app = App::driver_manager(Box::new(FsDriverRepository::new(&root)));

    handle_key(&mut app, key(KeyCode::Char('i')));
    handle_paste(&mut app, &archive.display().to_string());
    handle_key(&mut app, key(KeyCode::Enter));

    let state = app.driver_manager_state();
    assert!(state.import_path().is_none());
    assert_eq!(state.drivers(), ["Turnip-25".to_string()]);
    assert_eq!(
        state.last_result(),
        Some(&OperationResult::Installed("Turnip-25".to_string()))
    );
    assert!(root.join("Turnip-25").is_dir());
}

#[test]
fn failed_import_reports_manifest_message() {
    let (temp_dir, root) = temp_driver_root();
    let archive = temp_dir.path().join("empty.zip");
    write_zip(&archive, &[("README", "no manifest here")]);
    let mut app = App::driver_manager(Box::new(FsDriverRepository::new(&root)));

    app.import_driver(&archive);

    let result = app.driver_manager_state().last_result().unwrap();
    assert!(!result.is_success());
    assert_eq!(
        result.message(),
        "Failed to install driver: no valid manifest found in archive"
    );
    assert!(app.driver_manager_state().drivers().is_empty());
}

#[test]
fn empty_import_path_just_closes_prompt() {
    let (_temp_dir, root) = temp_driver_root();
    let mut app = App::driver_manager(Box::new(FsDriverRepository::new(&root)));

    handle_key(&mut app, key(KeyCode::Char('i')));
    type_text(&mut app, "   ");
    handle_key(&mut app, key(KeyCode::Enter));

    let state = app.driver_manager_state();
    assert!(state.import_path().is_none());
    assert!(state.last_result().is_none());
}

#[test]
fn delete_needs_confirmation() {
    let (temp_dir, root) = temp_driver_root();
    let repo = FsDriverRepository::new(&root);
    repo.import(&driver_package(temp_dir.path(), "a.zip", "Alpha")).unwrap();
    repo.import(&driver_package(temp_dir.path(), "b.zip", "Beta")).unwrap();
    let mut app = App::driver_manager(Box::new(repo));

    handle_key(&mut app, key(KeyCode::Down));
    handle_key(&mut app, key(KeyCode::Char('d')));
    assert_eq!(app.driver_manager_state().pending_delete(), Some("Beta"));

    // Anything but yes cancels.
    handle_key(&mut app, key(KeyCode::Char('n')));
    assert!(app.driver_manager_state().pending_delete().is_none());
    assert!(root.join("Beta").is_dir());

    handle_key(&mut app, key(KeyCode::Char('d')));
    handle_key(&mut app, key(KeyCode::Char('y')));

    let state = app.driver_manager_state();
    assert!(!root.join("Beta").exists());
    assert_eq!(state.drivers(), ["Alpha".to_string()]);
    assert_eq!(state.focused_driver(), Some("Alpha"));
    assert_eq!(
        state.last_result().map(OperationResult::message).as_deref(),
        Some("Removed driver: Beta")
    );
}

#[test]
fn delete_of_vanished_driver_reports_failure() {
    let (temp_dir, root) = temp_driver_root();
    let repo = FsDriverRepository::new(&root);
    repo.import(&driver_package(temp_dir.path(), "a.zip", "Alpha")).unwrap();
    let mut app = App::driver_manager(Box::new(repo));

    std::fs::remove_dir_all(root.join("Alpha")).unwrap();
    app.dispatch_drivers(DriverManagerIntent::RequestDelete);
    app.confirm_delete();

    let state = app.driver_manager_state();
    assert_eq!(
        state.last_result(),
        Some(&OperationResult::Failed("Failed to remove Alpha".to_string()))
    );
    assert!(state.drivers().is_empty());
}

#[test]
fn escape_closes_and_quits() {
    let (_temp_dir, root) = temp_driver_root();
    let mut app = App::driver_manager(Box::new(FsDriverRepository::new(&root)));

    handle_key(&mut app, key(KeyCode::Esc));

    assert!(!app.driver_manager_state().is_visible());
    assert!(app.should_quit());
}
