use crate::prelude::{MapError, MapOptions, MapResult};
use crate::provider::{ContainerId, Control, MapProvider, MapWidget};
use crate::telemetry::LogManager;

/// Collects the access token and turns it into a live widget.
pub struct CredentialGate {
    token: String,
    logger: LogManager,
}

impl CredentialGate {
    pub fn new() -> Self {
        Self {
            token: String::new(),
            logger: LogManager::new("gate"),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// The submit action is disabled while the field is empty.
    pub fn can_submit(&self) -> bool {
        !self.token.is_empty()
    }

    /// Constructs a widget bound to `container` and docks the navigation
    /// control. Nothing is kept when construction fails.
    pub fn submit<P: MapProvider>(
        &self,
        provider: &mut P,
        container: &ContainerId,
        options: &MapOptions,
    ) -> MapResult<P::Widget> {
        if !self.can_submit() {
            return Err(MapError::EmptyToken);
        }

        self.logger.detail(&format!(
            "constructing widget in container '{}' with style {}",
            container.as_str(),
            options.style
        ));
        let mut widget = provider.construct(container, &self.token, options)?;
        widget.add_control(Control::Navigation, options.control_position);
        Ok(widget)
    }
}

impl Default for CredentialGate {
    fn default() -> Self {
        Self::new()
    }
}
