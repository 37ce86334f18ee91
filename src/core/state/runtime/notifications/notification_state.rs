use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Created → Visible → Dismissing → Removed. Never goes backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationPhase {
    Created,
    Visible,
    Dismissing,
    Removed,
}

impl NotificationPhase {
    pub fn next(self) -> Option<Self> {
        match self {
            NotificationPhase::Created => Some(NotificationPhase::Visible),
            NotificationPhase::Visible => Some(NotificationPhase::Dismissing),
            NotificationPhase::Dismissing => Some(NotificationPhase::Removed),
            NotificationPhase::Removed => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub phase: NotificationPhase,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            phase: NotificationPhase::Created,
            created_at: Utc::now(),
        }
    }

    /// Moves to the next phase, returning it. `None` once removed.
    pub fn advance(&mut self) -> Option<NotificationPhase> {
        let next = self.phase.next()?;
        self.phase = next;
        Some(next)
    }
}

/// Broadcast on every phase change, including creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub id: Uuid,
    pub phase: NotificationPhase,
    pub severity: Severity,
    pub message: String,
}

impl From<&Notification> for NotificationEvent {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            phase: n.phase,
            severity: n.severity,
            message: n.message.clone(),
        }
    }
}
