//! Application events for the event-driven architecture
//!
//! Services publish an `AppEvent` after every state change. The terminal
//! loop treats any event as a redraw request; navigation events also
//! switch pages.

use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::Route;
use crate::providers::DialogKind;

/// Events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// User preferences changed
    LocalConfigChanged,

    /// Theme preference or effective theme changed
    ThemeChanged { dark: bool },

    /// Full screen loader shown or hidden
    LoaderChanged { visible: bool },

    /// Side panel or schema selector changed
    LayoutChanged,

    /// Persisted editor config changed
    ConfigUpdated,

    /// Undo/redo availability changed
    HistoryChanged { has_undo: bool, has_redo: bool },

    /// A diagram became the current diagram
    DiagramLoaded { diagram_id: String },

    /// The current diagram was edited
    DiagramUpdated { diagram_id: String },

    /// A diagram was deleted
    DiagramDeleted { diagram_id: String },

    /// Canvas viewport moved or zoomed
    CanvasChanged,

    /// An image export finished
    ImageExported { path: String },

    /// A dialog slot changed visibility
    DialogChanged { kind: DialogKind, open: bool },

    /// Toast list changed
    ToastsChanged,

    /// Navigation request
    Navigate { route: Route },

    /// Quit request
    Shutdown,
}

/// Publishing side of the event channel
///
/// A detached sink drops every event, so services work unchanged in tests.
#[derive(Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::UnboundedSender<AppEvent>>,
}

impl EventSink {
    pub fn new(sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Sink that drops everything
    pub fn detached() -> Self {
        Self::default()
    }

    /// Create a connected sink and its receiver
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: AppEvent) {
        if let Some(sender) = &self.sender {
            trace!("emit {:?}", event);
            let _ = sender.send(event);
        }
    }

    /// Request navigation to `route`
    pub fn navigate(&self, route: Route) {
        self.emit(AppEvent::Navigate { route });
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("connected", &self.sender.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_sink_drops_events() {
        let sink = EventSink::detached();
        sink.emit(AppEvent::LayoutChanged);
    }

    #[test]
    fn test_channel_delivers_in_order() {
        let (sink, mut rx) = EventSink::channel();
        sink.emit(AppEvent::LayoutChanged);
        sink.navigate(Route::Home);

        assert_eq!(rx.try_recv().unwrap(), AppEvent::LayoutChanged);
        assert_eq!(rx.try_recv().unwrap(), AppEvent::Navigate { route: Route::Home });
    }
}
