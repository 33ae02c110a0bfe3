//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "ORDER_SERVICE_CONFIG";

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "order-service.yaml";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (e.g., "0.0.0.0:8080")
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Product catalog service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL; products are fetched from `{base_url}/products/{id}`
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    /// Per-request timeout of product lookups
    #[serde(default = "default_catalog_timeout_ms")]
    pub timeout_ms: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            timeout_ms: default_catalog_timeout_ms(),
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Directory used by `/admin/reports/save`
    #[serde(default = "default_reports_dir")]
    pub directory: PathBuf,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            directory: default_reports_dir(),
        }
    }
}

/// SMTP settings for report emails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    pub host: String,

    #[serde(default = "default_mail_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Sender mailbox, e.g. "Reports <reports@example.com>"
    pub from: String,

    /// Upgrade the connection with STARTTLS
    #[serde(default = "default_true")]
    pub starttls: bool,
}

/// Complete configuration of the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub reports: ReportsConfig,

    /// Without a mail section, emails are logged instead of sent
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `$ORDER_SERVICE_CONFIG`, then `order-service.yaml`, then defaults
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_yaml_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_yaml_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_catalog_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_catalog_timeout_ms() -> u64 {
    5000
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_mail_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.catalog.base_url, "http://localhost:8081");
        assert_eq!(config.catalog.timeout(), Duration::from_secs(5));
        assert_eq!(config.reports.directory, PathBuf::from("reports"));
        assert!(config.mail.is_none());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
catalog:
  timeout_ms: 250
mail:
  host: smtp.example.com
  from: reports@example.com
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.catalog.base_url, "http://localhost:8081");
        assert_eq!(config.catalog.timeout_ms, 250);

        let mail = config.mail.unwrap();
        assert_eq!(mail.port, 587);
        assert!(mail.starttls);
        assert_eq!(mail.username, None);
    }

    #[test]
    fn test_yaml_serialization() {
        let mut config = AppConfig::default();
        config.server.bind = "0.0.0.0:9000".to_string();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reports:\n  directory: /tmp/order-reports").unwrap();

        let config = AppConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.reports.directory, PathBuf::from("/tmp/order-reports"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AppConfig::from_yaml_file("/nonexistent/order-service.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
