use crate::config::{ArtsConfig, FileConfig, LocationsConfig};
use crate::domain::model::{Holdings, ZooIdSource};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_seconds, Validate};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "zoo_locations")]
#[command(about = "Generate CSV of zoo_id, latitude, longitude from Zootierliste")]
pub struct LocationsArgs {
    /// map_zoos.php URL [default: https://www.zootierliste.de/map_zoos.php]
    #[arg(long)]
    pub url: Option<String>,

    /// Output CSV path [default: zoo_locations.csv]
    #[arg(long)]
    pub out: Option<String>,

    /// TOML file with default settings
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl LocationsArgs {
    /// 優先順序：命令列 > TOML > 內建預設值
    pub fn into_config(self) -> Result<LocationsConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::from_file(path)?.locations_config()?,
            None => LocationsConfig::default(),
        };

        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(out) = self.out {
            config.out = out;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "zoo_arts")]
#[command(about = "Fetch Zootierliste 'art' IDs per zoo and write per-zoo CSV files")]
#[command(group(ArgGroup::new("source").required(true).args(["zoo_id", "locations"])))]
pub struct ArtsArgs {
    /// Fetch a single zoo by ID
    #[arg(long, allow_negative_numbers = true)]
    pub zoo_id: Option<i64>,

    /// CSV with a 'zoo_id' column (e.g. zoo_locations.csv)
    #[arg(long, value_name = "CSV")]
    pub locations: Option<PathBuf>,

    /// Offset into the locations list
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Max IDs to process from the locations list
    #[arg(long)]
    pub limit: Option<usize>,

    /// 0 = current holdings (default), 1 = former
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub haltung: Option<u8>,

    /// Directory to write <zoo_id>.csv files [default: .]
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Sleep between requests in seconds [default: 1.0]
    #[arg(long, allow_negative_numbers = true)]
    pub sleep: Option<f64>,

    /// HTTP retries per request [default: 3]
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Connect and read timeouts in seconds [default: 5.0 20.0]
    #[arg(long, num_args = 2, value_names = ["CONNECT", "READ"])]
    pub timeout: Option<Vec<f64>>,

    /// ajax.php URL [default: https://www.zootierliste.de/ajax.php]
    #[arg(long)]
    pub url: Option<String>,

    /// TOML file with default settings
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ArtsArgs {
    pub fn source(&self) -> Result<ZooIdSource> {
        match (self.zoo_id, &self.locations) {
            (Some(zoo_id), _) => Ok(ZooIdSource::Single(zoo_id)),
            (None, Some(path)) => Ok(ZooIdSource::Locations {
                path: path.clone(),
                offset: self.offset,
                limit: self.limit,
            }),
            (None, None) => Err(EtlError::ConfigError {
                message: "either --zoo-id or --locations is required".to_string(),
            }),
        }
    }

    pub fn into_config(self) -> Result<ArtsConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::from_file(path)?.arts_config()?,
            None => ArtsConfig::default(),
        };

        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }
        if let Some(haltung) = self.haltung {
            config.holdings =
                Holdings::try_from(haltung).map_err(|message| EtlError::ConfigError { message })?;
        }
        if let Some(sleep) = self.sleep {
            // 負數視為不停頓
            config.sleep = validate_seconds("sleep", sleep.max(0.0))?;
        }
        if let Some(max_retries) = self.max_retries {
            config.http.max_retries = max_retries;
        }
        if let Some(timeout) = self.timeout {
            if let [connect, read] = timeout.as_slice() {
                config.http.connect_timeout = validate_seconds("timeout.connect", *connect)?;
                config.http.read_timeout = validate_seconds("timeout.read", *read)?;
            }
        }

        config.validate()?;
        Ok(config)
    }
}
