use crate::config::ContainerConfig;
use crate::drivers::DriverRepository;
use crate::reconcile::ReconcileContext;
use crate::ui::app::App;
use crate::ui::editor::EditorOutcome;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, handle_paste};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Interactive configuration editor for one container record.
///
/// The caller's record is only read. A save hands back the edited record
/// through [`EditorOutcome::Saved`]; anything else is
/// [`EditorOutcome::Dismissed`].
pub struct ConfigEditor {
    app: App,
}

impl ConfigEditor {
    pub fn open(
        title: impl Into<String>,
        initial: ContainerConfig,
        default_profile: bool,
        ctx: Arc<ReconcileContext>,
    ) -> Self {
        Self {
            app: App::editor(title.into(), initial, default_profile, ctx),
        }
    }

    pub fn run(mut self) -> io::Result<EditorOutcome> {
        run_loop(&mut self.app)?;
        Ok(self
            .app
            .take_editor_outcome()
            .unwrap_or(EditorOutcome::Dismissed))
    }
}

/// Interactive import/removal of custom drivers.
pub fn run_driver_manager(repository: Box<dyn DriverRepository>) -> io::Result<()> {
    let mut app = App::driver_manager(repository);
    run_loop(&mut app)
}

fn run_loop(app: &mut App) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(TICK_RATE);

    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Input(key)) => handle_key(app, key),
            Ok(AppEvent::Paste(text)) => handle_paste(app, &text),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(_, _)) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}
