use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub email: EmailSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Transactional email provider and the addresses used on outgoing mail
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    #[serde(default = "default_email_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    /// Sender used for every outgoing email, e.g. `Portfolio <hello@example.com>`
    pub from_address: String,
    /// Site owner inbox receiving submission notifications
    pub admin_address: String,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    pub timeout_secs: Option<u64>,
}

fn default_email_endpoint() -> String { "https://api.resend.com".to_string() }
fn default_site_name() -> String { "Portfolio".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// Output shape of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with PORTFOLIO_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., PORTFOLIO__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PORTFOLIO")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply well-known provider variables on top of the layered config.
///
/// `RESEND_API_KEY` is what the provider's own tooling exports, so it wins
/// over `email.api_key` when present.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("RESEND_API_KEY") {
        builder = builder.set_override("email.api_key", api_key)?;
    }
    if let Ok(admin) = env::var("ADMIN_EMAIL") {
        builder = builder.set_override("email.admin_address", admin)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_file_applies_defaults() {
        let path = std::env::temp_dir().join(format!("portfolio-forms-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 8081

[email]
api_key = "re_test"
from_address = "Portfolio <hello@example.com>"
admin_address = "owner@example.com"
"#
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.email.endpoint, "https://api.resend.com");
        assert_eq!(settings.email.site_name, "Portfolio");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert!(settings.email.timeout_secs.is_none());
    }

    #[test]
    fn test_load_from_file_reads_log_format() {
        let path = std::env::temp_dir().join(format!("portfolio-forms-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 8081

[email]
api_key = "re_test"
from_address = "Portfolio <hello@example.com>"
admin_address = "owner@example.com"

[logging]
level = "debug"
format = "pretty"
"#
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let path = std::env::temp_dir().join(format!("portfolio-forms-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 8081

[email]
api_key = "re_test"
from_address = "Portfolio <hello@example.com>"
admin_address = "owner@example.com"

[logging]
format = "xml"
"#
        )
        .unwrap();

        let result = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
