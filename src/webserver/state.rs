/// Shared state for the webserver
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::enso::EnsoClient;
use crate::sdk::SdkClient;
use crate::types::Environment;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub enso: EnsoClient,
    pub startup_time: DateTime<Utc>,
    prod_sdk: SdkClient,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            prod_sdk: SdkClient::new(&config.sdk, Environment::Prod),
            enso: EnsoClient::new(&config.enso),
            startup_time: Utc::now(),
            config,
        }
    }

    /// SDK client for a request's backend environment. Prod reuses the
    /// shared client; other environments get a fresh one per request.
    pub fn sdk_for(&self, environment: Environment) -> SdkClient {
        match environment {
            Environment::Prod => self.prod_sdk.clone(),
            other => SdkClient::new(&self.config.sdk, other),
        }
    }
}
