use once_cell::sync::Lazy;
use std::env;

/// Scope of the "exactly one active agreement" rule.
///
/// The booking UI historically supported both interpretations, so the
/// choice is surfaced as configuration instead of being hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationScope {
    /// At most one active agreement in the whole table.
    Global,
    /// At most one active agreement per company.
    PerCompany,
}

impl ActivationScope {
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "per_company" | "per-company" | "company" => Self::PerCompany,
            _ => Self::Global,
        }
    }
}

pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub activation_scope: ActivationScope,
}

impl Config {
    pub fn init() -> Self {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://transport_admin.db".to_string()),
            activation_scope: ActivationScope::from_env_value(
                &env::var("AGREEMENT_ACTIVATION_SCOPE").unwrap_or_default(),
            ),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::init);
