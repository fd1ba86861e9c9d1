//! Terminal User Interface module using ratatui
//!
//! Pages render the service state; every `AppEvent` a service publishes
//! wakes the loop and triggers a redraw.

mod app;
mod components;
mod events;
mod keys;
mod pages;
mod styles;
mod utils;

pub use app::App;
pub use events::{Event, EventHandler};
pub use keys::KeyMap;

use anyhow::Result;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::app::EventSink;
use crate::config::Settings;
use crate::domain::Route;

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main TUI entry point
pub async fn run(settings: Arc<Settings>, route: Route) -> Result<()> {
    let (events, app_events) = EventSink::channel();
    let mut app = App::new(settings, events, route).await?;

    let mut terminal = init_terminal()?;
    let mut event_handler = EventHandler::new(app_events, TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &mut event_handler).await;

    restore_terminal(&mut terminal)?;
    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;
        if let Some(title) = app.take_title_change() {
            execute!(terminal.backend_mut(), SetTitle(title))?;
        }

        match event_handler.next().await {
            Some(event) => {
                if app.handle_event(event).await? {
                    break;
                }
            }
            None => break,
        }
    }
    Ok(())
}
