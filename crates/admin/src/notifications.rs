//! User-facing notifications (toasts).
//!
//! A [`Notifier`] is a shared queue: controllers push into it, the shell
//! drains it after each operation and renders what it finds. Every
//! notification is also emitted as a tracing event so nothing shown to the
//! operator is missing from the logs.

use std::sync::{Arc, Mutex, PoisonError};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Default,
    Destructive,
    Success,
    Info,
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub variant: Variant,
}

/// Shared notification queue. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification.
    pub fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Destructive => tracing::warn!(
                title = %notification.title,
                description = notification.description.as_deref().unwrap_or(""),
                "notification"
            ),
            Variant::Default | Variant::Success | Variant::Info => tracing::info!(
                title = %notification.title,
                description = notification.description.as_deref().unwrap_or(""),
                "notification"
            ),
        }

        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(Notification {
            title: title.into(),
            description: Some(description.into()),
            variant: Variant::Success,
        });
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(Notification {
            title: title.into(),
            description: Some(description.into()),
            variant: Variant::Destructive,
        });
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.notify(Notification {
            title: title.into(),
            description: Some(description.into()),
            variant: Variant::Info,
        });
    }

    /// Take every queued notification, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Copy of the queue without draining it.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of queued notifications of `variant`.
    #[must_use]
    pub fn count(&self, variant: Variant) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|n| n.variant == variant)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_queue() {
        let notifier = Notifier::new();
        let handle = notifier.clone();
        handle.error("Error", "Failed to load jobs");
        notifier.success("Success", "Job created");

        assert_eq!(notifier.count(Variant::Destructive), 1);
        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, "Error");
        assert!(handle.drain().is_empty());
    }
}
