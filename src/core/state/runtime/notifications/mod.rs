pub mod notification_center;
pub mod notification_state;

pub use notification_center::NotificationCenter;
pub use notification_state::{Notification, NotificationEvent, NotificationPhase, Severity};
