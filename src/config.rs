// Service configuration, loaded with the 'config' crate and 'dotenv'

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // Secret used to sign session tokens (HS256)
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    // JSON file standing in for device-local key-value storage
    pub session_store_path: String,
    // Artificial delay applied before every repository call
    pub simulated_latency_ms: u64,
    pub catalog_size: usize,
    // Fixes the generated catalog when set
    pub catalog_seed: Option<u64>,
    // The single password every mock account accepts
    pub mock_password: String,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("jwt_secret", "dev-only-secret-change-me")?
            .set_default("token_ttl_hours", 24)?
            .set_default("session_store_path", "session.json")?
            .set_default("simulated_latency_ms", 0)?
            .set_default("catalog_size", 60)?
            .set_default("mock_password", "password123")?
            // Load from a configuration file (e.g., config.toml)
            .add_source(File::with_name("config").required(false))
            // Load from environment variables (e.g., APP_JWT_SECRET)
            .add_source(Environment::with_prefix("APP").try_parsing(true));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Settings suitable for tests: no latency, fixed seed, explicit store path.
    pub fn for_tests(session_store_path: impl Into<String>) -> Self {
        Settings {
            server_address: "127.0.0.1:0".to_string(),
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 1,
            session_store_path: session_store_path.into(),
            simulated_latency_ms: 0,
            catalog_size: 60,
            catalog_seed: Some(7),
            mock_password: "password123".to_string(),
        }
    }
}
