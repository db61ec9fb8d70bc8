//! Fire-and-forget user notifications.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Keeps the most recent notifications for a front-end to show as toasts.
#[derive(Debug, Default)]
pub struct Toasts {
    recent: VecDeque<Notification>,
}

const MAX_TOASTS: usize = 5;

impl Toasts {
    pub fn latest(&self) -> Option<&Notification> {
        self.recent.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.recent.iter()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Notification> + '_ {
        self.recent.drain(..)
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notification: Notification) {
        if self.recent.len() == MAX_TOASTS {
            self.recent.pop_front();
        }
        self.recent.push_back(notification);
    }
}

pub(crate) const COPIED: &str = "Password copied! Clipboard will clear in 5 minutes.";
pub(crate) const CLIPBOARD_CLEARED: &str = "Clipboard cleared for security.";
pub(crate) const HISTORY_CLEARED: &str = "Generation history cleared.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_keep_the_latest_few() {
        let mut toasts = Toasts::default();
        for i in 0..7 {
            toasts.notify(Notification::success(format!("n{i}")));
        }
        assert_eq!(toasts.iter().count(), MAX_TOASTS);
        assert_eq!(toasts.latest().unwrap().message, "n6");
        assert_eq!(toasts.drain().next().unwrap().message, "n2");
        assert!(toasts.latest().is_none());
    }
}
