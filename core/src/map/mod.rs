pub mod component;
pub mod gate;
pub mod notice;
pub mod projector;

pub use component::{LifecycleState, MapComponent};
pub use gate::CredentialGate;
pub use notice::{
    Notification, NotificationKind, INITIALIZED_MESSAGE, INVALID_TOKEN_MESSAGE, TOKEN_HELP_URL,
};
pub use projector::{MarkerProjector, RedrawSummary};
