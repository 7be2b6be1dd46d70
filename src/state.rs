use std::sync::Arc;

use linguadesk_access::RoleRegistry;
use linguadesk_auth::CognitoClient;
use linguadesk_config::{CognitoConfig, CorsConfig, ServerConfig, SessionConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<RoleRegistry>,
    pub cognito: CognitoClient,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    /// Loads every config section from the environment and seeds a fresh
    /// default registry.
    pub fn from_env() -> anyhow::Result<Self> {
        let server_config = ServerConfig::from_env();
        let cognito = CognitoClient::new(CognitoConfig::from_env()?)?;

        Ok(Self {
            registry: Arc::new(RoleRegistry::with_defaults()),
            cognito,
            session_config: SessionConfig::from_env(&server_config)?,
            cors_config: CorsConfig::from_env(),
            server_config,
        })
    }
}
