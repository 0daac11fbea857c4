//! Configuration management for the explorer CLI and client

use config::{Config as Layered, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::auth::Credentials;
use crate::cli::{ConfigArgs, ConfigCommand};
use crate::error::{ExplorerError, Result};
use crate::ui::UI;

pub const DEFAULT_ENDPOINT: &str = "https://gateway.marvel.com/v1/public";
const DEFAULT_TIMEOUT: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 100;
const ENV_PREFIX: &str = "MARVEL";

/// User settings persisted as JSON in the config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub verbose: bool,
    /// Records fetched by the list and gallery views
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            verbose: false,
            page_size: default_page_size(),
            public_key: None,
            private_key: None,
        }
    }
}

impl Config {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path())
    }

    /// Layer defaults, the JSON file at `path` (if present) and `MARVEL_*`
    /// environment variables, in that order
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layered(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: &Path, environment: Environment) -> Result<Self> {
        let layered = Layered::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("timeout", DEFAULT_TIMEOUT)?
            .set_default("verbose", false)?
            .set_default("page_size", DEFAULT_PAGE_SIZE)?
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(environment)
            .build()?;

        Ok(layered.try_deserialize()?)
    }

    pub async fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).await?;
        Ok(())
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.public_key, &self.private_key) {
            (Some(public_key), Some(private_key)) => {
                let credentials = Credentials::new(public_key.as_str(), private_key.as_str());
                credentials.validate()?;
                Ok(credentials)
            }
            _ => Err(ExplorerError::missing_credentials()),
        }
    }

    pub fn to_client_config(&self) -> Result<ClientConfig> {
        let use_proxy = !self.endpoint.contains("localhost") && !self.endpoint.contains("127.0.0.1");

        ClientConfigBuilder::new()
            .base_url(&self.endpoint)
            .timeout(self.timeout)
            .use_proxy(use_proxy)
            .credentials(self.credentials()?)
            .build()
    }
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marvel-explorer")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

/// Client configuration injected into the HTTP client at construction
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: u64,
    pub use_proxy: bool,
    pub credentials: Credentials,
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<u64>,
    use_proxy: Option<bool>,
    credentials: Option<Credentials>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn use_proxy(mut self, use_proxy: bool) -> Self {
        self.use_proxy = Some(use_proxy);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let config = ClientConfig {
            base_url: self.base_url.unwrap_or_else(default_endpoint),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            use_proxy: self.use_proxy.unwrap_or(true),
            credentials: self.credentials.ok_or_else(ExplorerError::missing_credentials)?,
        };

        config.validate()?;
        Ok(config)
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ExplorerError::invalid_endpoint("Base URL cannot be empty"));
        }
        if self.timeout == 0 {
            return Err(ExplorerError::config("Timeout must be at least one second"));
        }
        self.credentials.validate()
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
        let base_url = if self.base_url.starts_with("http://") || self.base_url.starts_with("https://")
        {
            self.base_url.clone()
        } else {
            format!("https://{}", self.base_url)
        };

        format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
    }
}

/// Handles the `config` subcommands
pub struct ConfigService {
    config: Config,
    config_path: PathBuf,
    ui: UI,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self::with_config_path(config, default_config_path())
    }

    pub fn with_config_path(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            ui: UI::new(),
        }
    }

    pub async fn handle_config(&mut self, args: ConfigArgs) -> Result<()> {
        match args.command {
            ConfigCommand::Show => {
                self.show();
                return Ok(());
            }
            ConfigCommand::SetKeys {
                public_key,
                private_key,
            } => {
                let credentials = Credentials::new(public_key, private_key);
                credentials.validate()?;
                self.config.public_key = Some(credentials.public_key);
                self.config.private_key = Some(credentials.private_key);
            }
            ConfigCommand::SetEndpoint { url } => {
                let parsed = reqwest::Url::parse(&url)
                    .map_err(|e| ExplorerError::invalid_endpoint(format!("{}: {}", url, e)))?;
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(ExplorerError::invalid_endpoint(format!(
                        "Unsupported scheme: {}",
                        parsed.scheme()
                    )));
                }
                self.config.endpoint = url;
            }
            ConfigCommand::SetTimeout { seconds } => {
                if seconds == 0 {
                    return Err(ExplorerError::invalid_input("Timeout must be at least one second"));
                }
                self.config.timeout = seconds;
            }
            ConfigCommand::SetPageSize { size } => {
                if !(1..=marvel_protocol::MAX_PAGE_SIZE).contains(&size) {
                    return Err(ExplorerError::invalid_input(format!(
                        "Page size must be between 1 and {}",
                        marvel_protocol::MAX_PAGE_SIZE
                    )));
                }
                self.config.page_size = size;
            }
            ConfigCommand::SetVerbose { enabled } => {
                self.config.verbose = enabled;
            }
            ConfigCommand::Reset => {
                self.config = Config::default();
            }
        }

        self.config.save(&self.config_path).await?;
        self.ui
            .success(&format!("Configuration saved to {}", self.config_path.display()));
        Ok(())
    }

    fn show(&self) {
        let masked = |value: &Option<String>| match value {
            Some(v) => mask_secret(v),
            None => "-".to_string(),
        };

        self.ui.card(
            "Configuration",
            vec![
                ("File", self.config_path.display().to_string()),
                ("Endpoint", self.config.endpoint.clone()),
                ("Timeout", format!("{}s", self.config.timeout)),
                ("Page size", self.config.page_size.to_string()),
                ("Verbose", self.config.verbose.to_string()),
                ("Public key", masked(&self.config.public_key)),
                ("Private key", masked(&self.config.private_key)),
            ],
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Keep the first four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
