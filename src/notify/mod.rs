//! User-facing notifications (toasts) raised by the submission workflow.
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Center,
    TopEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub text: Option<String>,
    pub position: Position,
    /// Auto-dismiss delay; `None` stays until dismissed.
    pub timer: Option<Duration>,
    pub show_confirm_button: bool,
}

impl Notification {
    /// Short self-dismissing toast confirming a new menu item.
    pub fn item_added(name: &str) -> Self {
        Notification {
            level: NotificationLevel::Success,
            title: format!("{} is added to the menu.", name),
            text: None,
            position: Position::TopEnd,
            timer: Some(Duration::from_millis(1500)),
            show_confirm_button: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Error,
            title: "Oops...".to_string(),
            text: Some(text.into()),
            position: Position::Center,
            timer: None,
            show_confirm_button: true,
        }
    }

    pub fn something_went_wrong() -> Self {
        Notification::error("Something went wrong! Please try again later.")
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stderr for the CLI.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(?notification, "notify");
        let mark = match notification.level {
            NotificationLevel::Success => "✔",
            NotificationLevel::Error => "✘",
        };
        match &notification.text {
            Some(text) => eprintln!("{} {} {}", mark, notification.title, text),
            None => eprintln!("{} {}", mark, notification.title),
        }
    }
}

/// Keeps every notification in memory, for embedding UIs that poll and for tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_added_is_a_timed_toast() {
        let n = Notification::item_added("Veg Roll");
        assert_eq!(n.title, "Veg Roll is added to the menu.");
        assert_eq!(n.timer, Some(Duration::from_millis(1500)));
        assert_eq!(n.position, Position::TopEnd);
        assert!(!n.show_confirm_button);
    }

    #[test]
    fn memory_notifier_drains() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::something_went_wrong());
        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.take().is_empty());
    }
}
