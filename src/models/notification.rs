//! Transient user notifications

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

/// A dismissible message raised by a view
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub raised_at: DateTime<Local>,
}

impl Notification {
    pub fn render(&self) -> String {
        let icon = match self.level {
            Level::Success => "✅",
            Level::Error => "❌",
            Level::Info => "ℹ️",
        };
        format!("[{}] {} {}", self.raised_at.format("%H:%M:%S"), icon, self.message)
    }
}

/// Notifications waiting to be shown, oldest first
#[derive(Debug, Default)]
pub struct Toasts {
    pending: Vec<Notification>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message.into());
    }

    fn push(&mut self, level: Level, message: String) {
        self.pending.push(Notification {
            level,
            message,
            raised_at: Local::now(),
        });
    }

    /// Take every pending notification, dismissing them
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Messages of the given level
    #[cfg(test)]
    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.pending
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_dismisses() {
        let mut toasts = Toasts::default();
        toasts.success("Login successful!");
        toasts.error("Failed to fetch balance");

        assert_eq!(toasts.messages(Level::Error), vec!["Failed to fetch balance"]);
        let shown = toasts.drain();
        assert_eq!(shown.len(), 2);
        assert!(shown[0].render().ends_with("✅ Login successful!"));
        assert!(toasts.pending().is_empty());
    }
}
