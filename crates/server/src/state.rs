use std::sync::Arc;
use ticketpress_core::{Authenticator, Config, JobDispatcher, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    dispatcher: JobDispatcher,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        dispatcher: JobDispatcher,
    ) -> Self {
        Self {
            config,
            authenticator,
            dispatcher,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn dispatcher(&self) -> &JobDispatcher {
        &self.dispatcher
    }
}
