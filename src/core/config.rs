use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_DAILY_URL: &str = "https://www.cnb.cz/en/financial-markets/foreign-exchange-market/central-bank-exchange-rate-fixing/central-bank-exchange-rate-fixing/daily.txt";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    #[serde(default = "default_daily_url")]
    pub daily_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retries: usize,
}

fn default_daily_url() -> String {
    DEFAULT_DAILY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            daily_url: default_daily_url(),
            timeout_secs: default_timeout_secs(),
            retries: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("cz", "cnb-daily", "cnb-daily")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Applies `PORT` and `CNB_DAILY_URL` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: '{port}'"))?;
            debug!("PORT override: {}", self.server.port);
        }
        if let Some(url) = lookup("CNB_DAILY_URL") {
            debug!("CNB_DAILY_URL override: {url}");
            self.provider.daily_url = url;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Port is required");
        }
        if self.provider.daily_url.trim().is_empty() {
            bail!("CNB daily URL is not set (provider.daily_url or CNB_DAILY_URL)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
server:
  host: "127.0.0.1"
  port: 8080
provider:
  daily_url: "http://example.com/daily.txt"
  timeout_secs: 3
  retries: 2
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.provider.daily_url, "http://example.com/daily.txt");
        assert_eq!(config.provider.timeout_secs, 3);
        assert_eq!(config.provider.retries, 2);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.provider, ProviderConfig::default());
        assert_eq!(config.provider.daily_url, DEFAULT_DAILY_URL);
    }

    #[test]
    fn test_overrides_replace_port_and_url() {
        let env: HashMap<&str, &str> = [("PORT", "4000"), ("CNB_DAILY_URL", "http://mock/daily")]
            .into_iter()
            .collect();
        let config = AppConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.provider.daily_url, "http://mock/daily");
    }

    #[test]
    fn test_invalid_port_override_fails() {
        let result = AppConfig::default().with_overrides(|k| {
            (k == "PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.unwrap_err().to_string().contains("Invalid PORT value"));
    }

    #[test]
    fn test_validate_rejects_missing_port_and_url() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.server.port = 0;
        assert_eq!(config.validate().unwrap_err().to_string(), "Port is required");

        config.server.port = 3001;
        config.provider.daily_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_path_reports_file() {
        let result = AppConfig::load_from_path("/nonexistent/cnb-daily.yaml");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("Failed to read config file")
        );
    }
}
