use crate::constant;
use crate::error::{DriveError, Result};
use crate::retry::{DEFAULT_RETRIES, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Credentials, endpoint and retry settings for a listing run
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Used verbatim instead of exchanging the refresh token
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Columns appended when none are given on the command line
    #[serde(default)]
    pub additional_fields: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RetryConfig {
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Human-readable duration such as "3s" or "500ms"
    #[serde(default = "default_delay")]
    pub delay: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            delay: default_delay(),
        }
    }
}

fn default_base_url() -> String {
    constant::BASE_URL.to_string()
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_delay() -> String {
    "3s".to_string()
}

impl Config {
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        let delay = parse_duration::parse(&self.retry.delay).map_err(|e| {
            DriveError::config(format!("invalid retry delay {:?}: {e}", self.retry.delay))
        })?;
        Ok(RetryPolicy::new(self.retry.retries, delay))
    }
}

pub const EXAMPLE_CONFIG: &str = r#"# drivelist configuration
#
# OAuth client from https://console.developers.google.com and a refresh
# token granted for the https://www.googleapis.com/auth/drive scope.
client_id: "YOUR_CLIENT_ID.apps.googleusercontent.com"
client_secret: "YOUR_CLIENT_SECRET"
refresh_token: "YOUR_REFRESH_TOKEN"

# Alternatively, a ready access token (skips the refresh exchange).
# access_token: "ya29...."

# base_url: "https://www.googleapis.com/drive/v2"

retry:
  retries: 3
  delay: "3s"

# Columns appended to each record unless -a is given, e.g. mimeType
additional_fields: []
"#;

/// Load configuration from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        DriveError::config(format!("failed to read config file {}: {e}", path.display()))
    })?;

    let config: Config = serde_yaml_ng::from_str(&content)
        .map_err(|e| DriveError::config(format!("failed to parse {}: {e}", path.display())))?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let has_access_token = config.access_token.as_deref().is_some_and(|t| !t.is_empty());
    if !has_access_token {
        if config.client_id.is_empty() {
            return Err(DriveError::config("client_id cannot be empty"));
        }
        if config.client_secret.is_empty() {
            return Err(DriveError::config("client_secret cannot be empty"));
        }
        if config.refresh_token.as_deref().is_none_or(str::is_empty) {
            return Err(DriveError::config(
                "refresh_token is required unless access_token is set",
            ));
        }
    }

    url::Url::parse(&config.base_url)
        .map_err(|e| DriveError::config(format!("invalid base_url {:?}: {e}", config.base_url)))?;

    config.retry_policy()?;
    Ok(())
}

/// Write the example configuration, refusing to overwrite an existing file
pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(DriveError::config(format!(
            "configuration file already exists: {}",
            path.display()
        )));
    }
    std::fs::write(path, EXAMPLE_CONFIG).map_err(|e| {
        DriveError::config(format!("failed to write {}: {e}", path.display()))
    })?;
    Ok(())
}
