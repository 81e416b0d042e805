pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{ArtsArgs, LocationsArgs};

pub use adapters::{LocalStorage, RetryingClient};
pub use app::pipelines::{ArtsBatch, LocationsPipeline, ZooArtsPipeline};
pub use app::{run_arts, run_locations};
pub use config::{ArtsConfig, HttpConfig, LocationsConfig};
pub use core::etl::EtlEngine;
pub use domain::model::{ArtRecord, BatchSummary, Holdings, LoadReport, ZooIdSource, ZooLocation};
pub use utils::error::{EtlError, Result};
