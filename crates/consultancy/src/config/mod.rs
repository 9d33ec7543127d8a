use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Whether internal error messages may be echoed to API callers.
    pub fn exposes_error_details(self) -> bool {
        matches!(self, Self::Development)
    }
}

const DEV_JWT_SECRET: &str = "development-only-jwt-secret";
const DEFAULT_BCRYPT_ROUNDS: u32 = 12;
const DEFAULT_JWT_TTL_HOURS: i64 = 24;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub assistant: AssistantConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;
        let client_url = non_empty("CLIENT_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let storage = StorageConfig {
            uri: non_empty("MONGODB_URI").unwrap_or_else(|| "memory://".to_string()),
        };

        let jwt_secret = match non_empty("JWT_SECRET") {
            Some(secret) => secret,
            None if environment == AppEnvironment::Production => {
                return Err(ConfigError::MissingJwtSecret)
            }
            None => DEV_JWT_SECRET.to_string(),
        };
        let token_ttl_hours = match non_empty("JWT_TTL_HOURS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or(ConfigError::InvalidTokenTtl)?,
            None => DEFAULT_JWT_TTL_HOURS,
        };
        let bcrypt_rounds = match non_empty("BCRYPT_ROUNDS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|rounds| (4..=31).contains(rounds))
                .ok_or(ConfigError::InvalidBcryptRounds)?,
            None => DEFAULT_BCRYPT_ROUNDS,
        };

        let auth = AuthConfig {
            jwt_secret,
            token_ttl_hours,
            bcrypt_rounds,
            seed_admin_email: non_empty("ADMIN_EMAIL"),
            seed_admin_password: non_empty("ADMIN_PASSWORD"),
        };

        let email = EmailConfig {
            sendgrid_api_key: non_empty("SENDGRID_API_KEY"),
            from_address: non_empty("EMAIL_FROM")
                .unwrap_or_else(|| "hello@consultancy.dev".to_string()),
            admin_address: non_empty("ADMIN_EMAIL"),
            client_url: client_url.clone(),
        };

        let assistant = AssistantConfig {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            model: non_empty("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                client_url,
            },
            telemetry: TelemetryConfig { log_level },
            storage,
            auth,
            email,
            assistant,
        })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Frontend origin allowed through CORS.
    pub client_url: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Document store location.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub uri: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_rounds: u32,
    pub seed_admin_email: Option<String>,
    pub seed_admin_password: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("bcrypt_rounds", &self.bcrypt_rounds)
            .field("seed_admin_email", &self.seed_admin_email)
            .field("seed_admin_password", &self.seed_admin_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Outbound email settings. Without a SendGrid key mails are only logged.
#[derive(Clone)]
pub struct EmailConfig {
    pub sendgrid_api_key: Option<String>,
    pub from_address: String,
    pub admin_address: Option<String>,
    pub client_url: String,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("sendgrid_configured", &self.sendgrid_api_key.is_some())
            .field("from_address", &self.from_address)
            .field("admin_address", &self.admin_address)
            .field("client_url", &self.client_url)
            .finish()
    }
}

#[derive(Clone)]
pub struct AssistantConfig {
    pub openai_api_key: Option<String>,
    pub model: String,
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("openai_configured", &self.openai_api_key.is_some())
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingJwtSecret,
    InvalidTokenTtl,
    InvalidBcryptRounds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingJwtSecret => {
                write!(f, "JWT_SECRET must be set outside development")
            }
            ConfigError::InvalidTokenTtl => {
                write!(f, "JWT_TTL_HOURS must be a positive number of hours")
            }
            ConfigError::InvalidBcryptRounds => {
                write!(f, "BCRYPT_ROUNDS must be between 4 and 31")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "CLIENT_URL",
            "MONGODB_URI",
            "JWT_SECRET",
            "JWT_TTL_HOURS",
            "BCRYPT_ROUNDS",
            "SENDGRID_API_KEY",
            "EMAIL_FROM",
            "ADMIN_EMAIL",
            "ADMIN_PASSWORD",
            "OPENAI_API_KEY",
            "OPENAI_MODEL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.client_url, "http://localhost:3000");
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.storage.uri, "memory://");
        assert_eq!(config.auth.bcrypt_rounds, 12);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert!(config.email.sendgrid_api_key.is_none());
        assert_eq!(config.assistant.model, "gpt-4o-mini");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 5000));
    }

    #[test]
    fn production_requires_jwt_secret() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::MissingJwtSecret)
        ));

        env::set_var("JWT_SECRET", "s3cret");
        let config = AppConfig::load().expect("config loads with secret");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.environment.exposes_error_details());
        reset_env();
    }

    #[test]
    fn rejects_out_of_range_bcrypt_rounds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BCRYPT_ROUNDS", "2");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidBcryptRounds)
        ));
        reset_env();
    }
}
