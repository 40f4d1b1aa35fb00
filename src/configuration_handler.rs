use crate::configuration::Configuration;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment-backed configuration. Reads `LOCALBOOK_API_URL`, falling
/// back to the local development backend.
#[derive(Clone)]
pub struct ConfigurationHandler;

impl ConfigurationHandler {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self
    }
}

impl Configuration for ConfigurationHandler {
    fn api_base_url(&self) -> String {
        std::env::var("LOCALBOOK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into())
    }
}
