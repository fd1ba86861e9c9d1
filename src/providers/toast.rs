use parking_lot::RwLock;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

use crate::app::{AppEvent, Command, EventSink};

const DEFAULT_DURATION: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Error,
}

/// A button on a toast
#[derive(Debug, Clone, PartialEq)]
pub struct ToastAction {
    pub label: String,
    pub command: Command,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, command: Command) -> Self {
        Self {
            label: label.into(),
            command,
        }
    }
}

/// A transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub actions: Vec<ToastAction>,
    pub duration: Duration,
    expires_at: Option<Instant>,
}

impl Toast {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: None,
            variant: ToastVariant::Default,
            actions: Vec::new(),
            duration: DEFAULT_DURATION,
            expires_at: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Error,
            ..Self::new(title)
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action(mut self, action: ToastAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Queue of visible toasts, newest last
#[derive(Clone, Default)]
pub struct Toaster {
    toasts: Arc<RwLock<Vec<Toast>>>,
    next_id: Arc<AtomicU64>,
    events: EventSink,
}

impl Toaster {
    pub fn new(events: EventSink) -> Self {
        Self {
            toasts: Arc::default(),
            next_id: Arc::new(AtomicU64::new(1)),
            events,
        }
    }

    /// Show `toast`; returns its id
    pub fn toast(&self, mut toast: Toast) -> u64 {
        toast.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        toast.expires_at = Some(Instant::now() + toast.duration);
        let id = toast.id;
        {
            let mut toasts = self.toasts.write();
            toasts.push(toast);
            let overflow = toasts.len().saturating_sub(MAX_TOASTS);
            toasts.drain(..overflow);
        }
        self.events.emit(AppEvent::ToastsChanged);
        id
    }

    pub fn dismiss(&self, id: u64) {
        let removed = {
            let mut toasts = self.toasts.write();
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        };
        if removed {
            self.events.emit(AppEvent::ToastsChanged);
        }
    }

    /// Drop toasts whose time is up
    pub fn prune_expired(&self, now: Instant) {
        let removed = {
            let mut toasts = self.toasts.write();
            let before = toasts.len();
            toasts.retain(|t| t.expires_at.map_or(true, |at| at > now));
            toasts.len() != before
        };
        if removed {
            self.events.emit(AppEvent::ToastsChanged);
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.read().clone()
    }

    /// Newest toast, which owns the action keys
    pub fn latest(&self) -> Option<Toast> {
        self.toasts.read().last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let toaster = Toaster::new(EventSink::detached());
        toaster.toast(Toast::new("Saved").duration(Duration::from_millis(10)));
        toaster.toast(Toast::new("Sticky").duration(Duration::from_secs(60)));

        toaster.prune_expired(Instant::now() + Duration::from_secs(1));
        let titles: Vec<_> = toaster.toasts().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Sticky"]);
    }

    #[test]
    fn test_oldest_toast_is_dropped_when_full() {
        let toaster = Toaster::new(EventSink::detached());
        let first = toaster.toast(Toast::new("1"));
        for i in 2..=4 {
            toaster.toast(Toast::new(i.to_string()));
        }
        assert_eq!(toaster.toasts().len(), MAX_TOASTS);
        assert!(toaster.toasts().iter().all(|t| t.id != first));
        assert_eq!(toaster.latest().unwrap().title, "4");
    }

    #[test]
    fn test_dismiss_by_id() {
        let toaster = Toaster::new(EventSink::detached());
        let id = toaster.toast(Toast::error("Failed").action(ToastAction::new("Retry", Command::SaveDiagram)));
        toaster.dismiss(id);
        assert!(toaster.toasts().is_empty());
    }
}
