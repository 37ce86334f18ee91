use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

use crate::core::state::runtime::notifications::notification_state::{
    Notification, NotificationEvent, NotificationPhase, Severity,
};

/// How long a notification stays visible before it starts dismissing.
pub const VISIBLE_DURATION: Duration = Duration::from_millis(3000);

/// Exit animation length between Dismissing and Removed.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

const EVENT_BUFFER: usize = 64;

/// Owns the live notifications and drives each one through its lifecycle.
///
/// Notifications stack independently: every `show` spawns its own timer task,
/// there is no queue and no coalescing, and nothing cancels a transition.
#[derive(Clone)]
pub struct NotificationCenter {
    live: Arc<RwLock<Vec<Notification>>>,
    events: broadcast::Sender<NotificationEvent>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            live: Arc::new(RwLock::new(Vec::new())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    /// Attaches a new notification and starts its lifecycle.
    pub async fn show(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Notification::new(message, severity);
        let id = notification.id;

        debug!("Notification {} ({:?}): {}", id, severity, notification.message);
        self.live.write().await.push(notification.clone());
        self.publish(&notification);

        let center = self.clone();
        tokio::spawn(async move {
            center.run_lifecycle(id).await;
        });

        id
    }

    /// Snapshot of notifications not yet removed.
    pub async fn active(&self) -> Vec<Notification> {
        self.live.read().await.clone()
    }

    async fn run_lifecycle(&self, id: Uuid) {
        // Visible on the next scheduler turn, after the creation was observed.
        tokio::task::yield_now().await;
        self.advance(id).await;

        sleep(VISIBLE_DURATION).await;
        self.advance(id).await;

        sleep(EXIT_DURATION).await;
        self.advance(id).await;
    }

    async fn advance(&self, id: Uuid) {
        let snapshot = {
            let mut live = self.live.write().await;
            let Some(pos) = live.iter().position(|n| n.id == id) else {
                return;
            };

            match live[pos].advance() {
                Some(NotificationPhase::Removed) => live.remove(pos),
                Some(_) => live[pos].clone(),
                None => return,
            }
        };

        self.publish(&snapshot);
    }

    fn publish(&self, notification: &Notification) {
        // No subscribers is fine: nobody is watching the screen.
        let _ = self.events.send(NotificationEvent::from(notification));
    }
}
