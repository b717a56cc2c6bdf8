use std::time::{Duration, Instant};
use travelmapcore::map::Notification;

/// How long a toast stays visible.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push_at(&mut self, notification: Notification, shown_at: Instant) {
        self.items.push(Toast {
            notification,
            shown_at,
        });
    }

    pub fn extend(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        let now = Instant::now();
        for notification in notifications {
            self.push_at(notification, now);
        }
    }

    /// Drops every toast shown at least [`TOAST_LIFETIME`] before `now`.
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < TOAST_LIFETIME);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_on_elapsed_time() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(Notification::success("first"), start);
        toasts.push_at(Notification::error("second"), start + Duration::from_secs(3));

        toasts.expire(start + Duration::from_secs(3));
        assert_eq!(toasts.iter().count(), 2);

        toasts.expire(start + TOAST_LIFETIME);
        let left: Vec<&str> = toasts
            .iter()
            .map(|toast| toast.notification.message.as_str())
            .collect();
        assert_eq!(left, vec!["second"]);

        toasts.expire(start + Duration::from_secs(7));
        assert!(toasts.is_empty());
    }

    #[test]
    fn expiry_does_not_depend_on_how_often_it_runs() {
        let start = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push_at(Notification::success("ready"), start);

        // a single check long after the lifetime still drops the toast
        toasts.expire(start + Duration::from_secs(30));
        assert!(toasts.is_empty());
    }
}
