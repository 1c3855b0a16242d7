use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub datastore_url: String,
    pub datastore_anon_key: String,
    pub auth_jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            datastore_url: env::var("DATASTORE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATASTORE_URL not set, using empty value");
                    String::new()
                }),
            datastore_anon_key: env::var("DATASTORE_ANON_KEY")
                .unwrap_or_else(|_| {
                    warn!("DATASTORE_ANON_KEY not set, using empty value");
                    String::new()
                }),
            auth_jwt_secret: env::var("AUTH_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("AUTH_JWT_SECRET not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.datastore_url.is_empty()
            && !self.datastore_anon_key.is_empty()
            && !self.auth_jwt_secret.is_empty()
    }
}
