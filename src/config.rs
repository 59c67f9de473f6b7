//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8081;
    pub const DEV_LLM_BASE_URL: &str = "https://api.openai.com/v1";
    pub const DEV_LLM_API_KEY: &str = "dev-llm-key-do-not-use-in-production";
    pub const DEV_LLM_MODEL: &str = "gpt-4o-mini";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Generation provider configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible chat completions API
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: SecretString,
    /// Model identifier requested for generation
    pub model: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory for static frontend assets (production only)
    pub static_dir: Option<PathBuf>,
    /// Generation provider configuration
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development):
    /// - All variables have sensible defaults
    /// - Only RUST_ENV is required
    ///
    /// In production mode (RUST_ENV=production):
    /// - STG_LLM_API_KEY is required
    /// - Server will NOT start if using development defaults
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `STG_HOST`: Server host (default: 127.0.0.1)
    /// - `STG_PORT`: Server port (default: 8081)
    /// - `STG_STATIC_DIR`: Static assets directory for production
    /// - `STG_LLM_BASE_URL`: Chat completions base URL (default: OpenAI)
    /// - `STG_LLM_API_KEY`: Provider API key (required in production)
    /// - `STG_LLM_MODEL`: Model identifier (default: gpt-4o-mini)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Parse environment - required
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        // Load values with defaults
        let host = env::var("STG_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("STG_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("STG_PORT must be a valid port number"))?;

        let static_dir = env::var("STG_STATIC_DIR").ok().map(PathBuf::from);

        let llm = LlmConfig {
            base_url: env::var("STG_LLM_BASE_URL")
                .unwrap_or_else(|_| defaults::DEV_LLM_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: env::var("STG_LLM_API_KEY")
                .unwrap_or_else(|_| defaults::DEV_LLM_API_KEY.to_string())
                .into(),
            model: env::var("STG_LLM_MODEL")
                .unwrap_or_else(|_| defaults::DEV_LLM_MODEL.to_string()),
        };

        let config = Config {
            environment,
            host,
            port,
            static_dir,
            llm,
        };

        // Validate production configuration
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.llm.api_key.expose_secret() == defaults::DEV_LLM_API_KEY {
            errors.push(
                "STG_LLM_API_KEY is using the development default. Set a real provider API key."
                    .to_string(),
            );
        }

        if self.llm.api_key.expose_secret().is_empty() {
            errors.push("STG_LLM_API_KEY must not be empty.".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_llm_config(api_key: &str) -> LlmConfig {
        LlmConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: api_key.to_string().into(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
            llm: test_llm_config("test-key"),
        };

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::parse("development"),
            Some(Environment::Development)
        );
        assert_eq!(Environment::parse("dev"), Some(Environment::Development));
        assert_eq!(
            Environment::parse("production"),
            Some(Environment::Production)
        );
        assert_eq!(Environment::parse("prod"), Some(Environment::Production));
        assert_eq!(Environment::parse("invalid"), None);
    }

    #[test]
    fn test_production_validation_fails_with_dev_defaults() {
        let config = Config {
            environment: Environment::Production,
            host: "0.0.0.0".to_string(),
            port: 8081,
            static_dir: None,
            llm: test_llm_config(defaults::DEV_LLM_API_KEY),
        };

        assert!(config.validate_production().is_err());
    }

    #[test]
    fn test_production_validation_passes_with_proper_config() {
        let config = Config {
            environment: Environment::Production,
            host: "0.0.0.0".to_string(),
            port: 8081,
            static_dir: Some(PathBuf::from("/app/static")),
            llm: test_llm_config("sk-prod-key"),
        };

        assert!(config.validate_production().is_ok());
    }
}
