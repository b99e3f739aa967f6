use std::path::PathBuf;

use crate::actor::{Actor, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub regions_path: Option<PathBuf>,
    pub reviews_page_size: u32,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
}

impl AppConfig {
    /// The actor implied by the configured credentials. Both the user id and
    /// the access token must be set to count as signed in.
    #[must_use]
    pub fn actor(&self) -> Actor {
        match (&self.user_id, &self.access_token) {
            (Some(id), Some(token)) => Actor::Authenticated(User::new(id, token)),
            _ => Actor::Anonymous,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("regions_path", &self.regions_path)
            .field("reviews_page_size", &self.reviews_page_size)
            .field("user_id", &self.user_id)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
