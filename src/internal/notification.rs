use std::time::{Duration, Instant};

pub const INFO_TIMEOUT: Duration = Duration::from_secs(3);
pub const ERROR_TIMEOUT: Duration = Duration::from_secs(5);

/// Type of notification to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Error,
}

/// A banner message that dismisses itself after `timeout`
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub timestamp: Instant,
    pub timeout: Duration,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info, INFO_TIMEOUT)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error, ERROR_TIMEOUT)
    }

    /// Override the auto-dismiss delay
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn new(
        message: impl Into<String>,
        notification_type: NotificationType,
        timeout: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            notification_type,
            timestamp: Instant::now(),
            timeout,
        }
    }

    pub fn is_error(&self) -> bool {
        self.notification_type == NotificationType::Error
    }

    /// Check if this notification should be auto-dismissed
    pub fn should_dismiss(&self) -> bool {
        self.timestamp.elapsed() > self.timeout
    }
}
