use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

use crate::app::AppEvent;

/// Events driving the terminal loop
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Bracketed paste
    Paste(String),

    /// Periodic tick event
    Tick,

    /// A service changed state
    App(AppEvent),
}

/// Merges terminal input, service events and a periodic tick
pub struct EventHandler {
    input: mpsc::UnboundedReceiver<Event>,
    app_events: mpsc::UnboundedReceiver<AppEvent>,
    tick: tokio::time::Interval,
}

impl EventHandler {
    pub fn new(app_events: mpsc::UnboundedReceiver<AppEvent>, tick_rate: Duration) -> Self {
        let (sender, input) = mpsc::unbounded_channel();

        // crossterm reads block, keep them off the runtime threads
        tokio::task::spawn_blocking(move || loop {
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(event) => {
                        if let Some(event) = convert(event) {
                            if sender.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        });

        Self {
            input,
            app_events,
            tick: tokio::time::interval(tick_rate),
        }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        tokio::select! {
            Some(event) = self.input.recv() => Some(event),
            Some(event) = self.app_events.recv() => Some(Event::App(event)),
            _ = self.tick.tick() => Some(Event::Tick),
        }
    }
}

fn convert(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Key(_) => None,
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
    }
}
