use crate::adapters::http::strip_bom;
use crate::adapters::RetryingClient;
use crate::app::pipelines::csv_bytes;
use crate::config::LocationsConfig;
use crate::core::feed::{dedupe_by_zoo_id, parse_locations};
use crate::core::format::format_coordinate;
use crate::core::{LoadReport, Pipeline, Storage, ZooLocation};
use crate::utils::error::{EtlError, Result};

pub const LOCATIONS_HEADER: [&str; 3] = ["zoo_id", "latitude", "longitude"];

/// map_zoos.php → 去重排序 → zoo_id,latitude,longitude CSV
pub struct LocationsPipeline<S: Storage> {
    storage: S,
    config: LocationsConfig,
    client: RetryingClient,
}

impl<S: Storage> LocationsPipeline<S> {
    pub fn new(storage: S, config: LocationsConfig) -> Result<Self> {
        let client = RetryingClient::new(&config.http)?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for LocationsPipeline<S> {
    type Raw = String;
    type Output = Vec<ZooLocation>;

    async fn extract(&self) -> Result<String> {
        tracing::info!("🚀 Fetching zoo locations from: {}", self.config.url);

        let response = self.client.send(self.client.get(&self.config.url)).await?;
        let text = response.text().await?;

        if !self.config.fetch_delay.is_zero() {
            tokio::time::sleep(self.config.fetch_delay).await;
        }

        Ok(strip_bom(&text).to_string())
    }

    async fn transform(&self, raw: String) -> Result<Vec<ZooLocation>> {
        let parsed = parse_locations(&raw);
        if parsed.locations.is_empty() {
            return Err(EtlError::NoLocations);
        }
        if parsed.discarded > 0 {
            tracing::info!("Skipped {} malformed feed rows", parsed.discarded);
        }

        let parsed_rows = parsed.locations.len();
        let locations = dedupe_by_zoo_id(parsed.locations);
        tracing::debug!(
            "Parsed {} rows, {} distinct zoos",
            parsed_rows,
            locations.len()
        );
        Ok(locations)
    }

    async fn load(&self, locations: Vec<ZooLocation>) -> Result<LoadReport> {
        let data = csv_bytes(
            LOCATIONS_HEADER,
            locations.iter().map(|location| {
                [
                    location.zoo_id.to_string(),
                    format_coordinate(location.latitude),
                    format_coordinate(location.longitude),
                ]
            }),
        )?;

        self.storage.write_file(&self.config.out, &data).await?;

        Ok(LoadReport {
            output_path: self.storage.display_path(&self.config.out),
            rows: locations.len(),
        })
    }
}
