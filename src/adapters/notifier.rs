use crate::domain::model::{Notification, NotificationLevel};
use crate::domain::ports::Notifier;
use std::sync::{Arc, Mutex, PoisonError};

/// Prints notifications for a terminal user and mirrors them to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let message = &notification.message;
        match notification.level {
            NotificationLevel::Success => {
                tracing::debug!("notification(success): {}", message);
                println!("✅ {}", message);
            }
            NotificationLevel::Info => {
                tracing::debug!("notification(info): {}", message);
                println!("ℹ️  {}", message);
            }
            NotificationLevel::Warning => {
                tracing::debug!("notification(warning): {}", message);
                eprintln!("⚠️  {}", message);
            }
            NotificationLevel::Error => {
                tracing::debug!("notification(error): {}", message);
                eprintln!("❌ {}", message);
            }
        }
    }
}

/// Keeps every notification in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_notifier_shares_buffer() {
        let notifier = CollectingNotifier::new();
        let handle = notifier.clone();

        notifier.notify(Notification::new(NotificationLevel::Info, "uno"));
        notifier.notify(Notification::new(NotificationLevel::Error, "dos"));

        assert_eq!(handle.messages(), vec!["uno".to_string(), "dos".to_string()]);
        assert_eq!(handle.take().len(), 2);
        assert!(notifier.is_empty());
    }
}
