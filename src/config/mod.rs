#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{ArtsArgs, LocationsArgs};
pub use toml_config::FileConfig;

use crate::domain::model::Holdings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_timeout, validate_url, Validate};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOCATIONS_URL: &str = "https://www.zootierliste.de/map_zoos.php";
pub const DEFAULT_LOCATIONS_OUT: &str = "zoo_locations.csv";
pub const DEFAULT_AJAX_URL: &str = "https://www.zootierliste.de/ajax.php";
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(120);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) zoo-etl/0.1";

/// 共用的 HTTP 設定 (逾時、重試、退避)
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub max_retries: u32,
    pub backoff_factor: f64,
    /// 退避與 Retry-After 的等待上限
    pub backoff_max: Duration,
    /// POST 是否也要重試
    pub retry_post: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(20),
            max_retries: 3,
            backoff_factor: 0.5,
            backoff_max: DEFAULT_BACKOFF_MAX,
            retry_post: false,
        }
    }
}

impl Validate for HttpConfig {
    fn validate(&self) -> Result<()> {
        validate_timeout("http.connect_timeout", self.connect_timeout)?;
        validate_timeout("http.read_timeout", self.read_timeout)?;
        if !self.backoff_factor.is_finite() || self.backoff_factor < 0.0 {
            return Err(crate::utils::error::EtlError::InvalidConfigValueError {
                field: "http.backoff_factor".to_string(),
                value: self.backoff_factor.to_string(),
                reason: "Backoff factor must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationsConfig {
    pub url: String,
    pub out: String,
    /// 抓完 feed 之後的停頓
    pub fetch_delay: Duration,
    pub http: HttpConfig,
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_LOCATIONS_URL.to_string(),
            out: DEFAULT_LOCATIONS_OUT.to_string(),
            fetch_delay: Duration::from_secs(1),
            http: HttpConfig {
                connect_timeout: Duration::from_secs(10),
                read_timeout: Duration::from_secs(30),
                ..HttpConfig::default()
            },
        }
    }
}

impl Validate for LocationsConfig {
    fn validate(&self) -> Result<()> {
        validate_url("locations.url", &self.url)?;
        validate_path("locations.out", &self.out)?;
        self.http.validate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtsConfig {
    pub url: String,
    pub out_dir: PathBuf,
    pub holdings: Holdings,
    /// 每個動物園請求之間的停頓
    pub sleep: Duration,
    pub http: HttpConfig,
}

impl Default for ArtsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_AJAX_URL.to_string(),
            out_dir: PathBuf::from("."),
            holdings: Holdings::Current,
            sleep: Duration::from_secs(1),
            http: HttpConfig {
                retry_post: true,
                ..HttpConfig::default()
            },
        }
    }
}

impl Validate for ArtsConfig {
    fn validate(&self) -> Result<()> {
        validate_url("arts.url", &self.url)?;
        validate_path("arts.out_dir", &self.out_dir.to_string_lossy())?;
        self.http.validate()
    }
}
