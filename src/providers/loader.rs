use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::app::{AppEvent, EventSink};

/// Full screen loading indicator
#[derive(Clone, Default)]
pub struct FullScreenLoader {
    visible: Arc<AtomicBool>,
    events: EventSink,
}

impl FullScreenLoader {
    pub fn new(events: EventSink) -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(false)),
            events,
        }
    }

    pub fn show_loader(&self) {
        self.set(true);
    }

    pub fn hide_loader(&self) {
        self.set(false);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn set(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::SeqCst) != visible {
            self.events.emit(AppEvent::LoaderChanged { visible });
        }
    }
}
