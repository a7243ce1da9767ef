//! Terminal lifecycle and the main event loop.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::api::BurrowApi;
use crate::config::BurrowConfig;
use crate::error::Result;
use crate::store::TreeStore;

use super::app::App;
use super::render;

pub fn run<S: TreeStore>(api: BurrowApi<S>, config: BurrowConfig, config_dir: &Path) -> Result<()> {
    let mut app = App::new(api, config, config_dir.to_path_buf())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|frame| render::draw(frame, &app))?;
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                continue;
            }
            if app.handle_key(key)? {
                break;
            }
            if let Some(id) = app.take_editor_request() {
                run_editor(&mut terminal, &mut app, &id)?;
            }
        }
    }
    Ok(())
}

/// Leave the TUI, run the external editor on one node, then restore the
/// terminal. Editor failures land on the status line instead of tearing
/// the session down.
fn run_editor<S: TreeStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    id: &str,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let outcome = app.edit_in_editor(id);

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    if let Err(e) = outcome {
        app.status_message = Some(e.to_string());
    }
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}
