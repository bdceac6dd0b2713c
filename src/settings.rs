use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr, time::Duration};

/// Development fallback, mirrors the secret shipped for local runs.
/// Rejected outright when APP_ENV=production.
const DEV_SECRET_KEY: &str = "dev-secret-key-change-in-production";

const DEFAULT_DATABASE_URL: &str = "sqlite://portfolio.db?mode=rwc";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default)]
    pub secret_key: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_github_username")]
    pub github_username: String,

    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Humantime duration string, e.g. "1h" or "90m".
    #[serde(default = "default_cache_duration")]
    pub cache_duration: String,

    #[serde(default = "default_frontend_data_file")]
    pub frontend_data_file: String,

    #[serde(default = "default_freeze_dir")]
    pub freeze_dir: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Site".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_github_username() -> String {
    "nataliabarros1994".to_string()
}
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_cache_file() -> String {
    "projects_data.json".to_string()
}
fn default_cache_duration() -> String {
    "1h".to_string()
}
fn default_frontend_data_file() -> String {
    "static/data/projects.json".to_string()
}
fn default_freeze_dir() -> String {
    "docs".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!("config/{}", env_name.to_string().to_lowercase()))
                    .required(false),
            )
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Heroku-style plain env vars take precedence over file values,
        // with local file-backed fallbacks when nothing is set.
        config.database_url = fill_or_default(config.database_url, "DATABASE_URL", DEFAULT_DATABASE_URL);
        config.secret_key = fill_or_default(config.secret_key, "SECRET_KEY", DEV_SECRET_KEY);

        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Message(format!("Invalid PORT value: {}", port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.secret_key.len() < 32 {
            errors.push("SECRET_KEY must be at least 32 characters");
        }
        if self.is_production() && self.secret_key == DEV_SECRET_KEY {
            errors.push("The development SECRET_KEY is not allowed in production");
        }
        if self.github_username.trim().is_empty() {
            errors.push("GITHUB_USERNAME cannot be empty");
        }
        if self.cache_duration().is_err() {
            errors.push("CACHE_DURATION is not a valid duration string");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cache_duration(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.cache_duration)
            .map_err(|e| ConfigError::Message(format!("Invalid cache_duration: {}", e)))
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_default(current: String, env_key: &str, fallback: &str) -> String {
    if !current.trim().is_empty() {
        return current;
    }
    env::var(env_key).unwrap_or_else(|_| fallback.to_string())
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url)
            .field("secret_key", &self.secret_key.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("github_username", &self.github_username)
            .field("github_api_url", &self.github_api_url)
            .field("cache_file", &self.cache_file)
            .field("cache_duration", &self.cache_duration)
            .field("frontend_data_file", &self.frontend_data_file)
            .field("freeze_dir", &self.freeze_dir)
            .finish()
    }
}
