pub const INITIALIZED_MESSAGE: &str = "Map initialized successfully!";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid Mapbox token. Please check and try again.";
/// Where users obtain an access token.
pub const TOKEN_HELP_URL: &str = "https://account.mapbox.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-facing toast queued by the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}
