use crate::adapters::http::strip_bom;
use crate::adapters::RetryingClient;
use crate::app::pipelines::csv_bytes;
use crate::config::ArtsConfig;
use crate::core::art_ids::extract_art_ids;
use crate::core::etl::EtlEngine;
use crate::core::{ArtRecord, LoadReport, Pipeline, Storage};
use crate::domain::model::BatchSummary;
use crate::utils::error::Result;

pub const ARTS_HEADER: [&str; 1] = ["art"];

/// 單一動物園：POST ajax.php → 解析 art ID → `<zoo_id>.csv`
pub struct ZooArtsPipeline<'a, S: Storage> {
    zoo_id: i64,
    client: &'a RetryingClient,
    storage: &'a S,
    config: &'a ArtsConfig,
}

impl<'a, S: Storage> ZooArtsPipeline<'a, S> {
    pub fn new(zoo_id: i64, client: &'a RetryingClient, storage: &'a S, config: &'a ArtsConfig) -> Self {
        Self {
            zoo_id,
            client,
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<'a, S: Storage> Pipeline for ZooArtsPipeline<'a, S> {
    type Raw = String;
    type Output = ArtRecord;

    async fn extract(&self) -> Result<String> {
        let zoo_id = self.zoo_id.to_string();
        let form = [
            ("id", zoo_id.as_str()),
            ("haltung", self.config.holdings.as_form_value()),
            ("aktion", "getarten"),
            ("sender", "zoosmap.php"),
            ("height", "530px"),
        ];

        tracing::debug!("Requesting holdings for zoo {}", self.zoo_id);
        let request = self.client.post(&self.config.url).form(&form);
        let response = self.client.send(request).await?;
        let text = response.text().await?;

        Ok(strip_bom(&text).to_string())
    }

    async fn transform(&self, raw: String) -> Result<ArtRecord> {
        let art_ids = extract_art_ids(&raw)?;
        Ok(ArtRecord::new(self.zoo_id, art_ids))
    }

    async fn load(&self, record: ArtRecord) -> Result<LoadReport> {
        let data = csv_bytes(ARTS_HEADER, record.art_ids.iter().map(|art| [art.to_string()]))?;
        let file_name = record.file_name();

        self.storage.write_file(&file_name, &data).await?;

        Ok(LoadReport {
            output_path: self.storage.display_path(&file_name),
            rows: record.art_ids.len(),
        })
    }
}

/// 依序處理多個動物園；單一失敗只記錄，不中斷整批
pub struct ArtsBatch<S: Storage> {
    storage: S,
    config: ArtsConfig,
    client: RetryingClient,
}

impl<S: Storage> ArtsBatch<S> {
    pub fn new(storage: S, config: ArtsConfig) -> Result<Self> {
        let client = RetryingClient::new(&config.http)?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }

    pub fn pipeline_for(&self, zoo_id: i64) -> ZooArtsPipeline<'_, S> {
        ZooArtsPipeline::new(zoo_id, &self.client, &self.storage, &self.config)
    }

    pub async fn run(&self, zoo_ids: &[i64]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for &zoo_id in zoo_ids {
            let engine = EtlEngine::new(self.pipeline_for(zoo_id));
            match engine.run().await {
                Ok(report) => {
                    summary.succeeded += 1;
                    println!("[OK] {}: {} arts → {}", zoo_id, report.rows, report.output_path);
                }
                Err(e) if e.is_http_status() => {
                    summary.http_failures += 1;
                    tracing::debug!("zoo {} failed: {:?}", zoo_id, e);
                    eprintln!("[HTTP] {}: {}", zoo_id, e);
                }
                Err(e) => {
                    summary.other_failures += 1;
                    tracing::debug!("zoo {} failed: {:?}", zoo_id, e);
                    eprintln!("[ERR] {}: {}", zoo_id, e);
                }
            }
            summary.processed += 1;

            // 不論成功與否都停頓，避免對方伺服器負擔過重
            if !self.config.sleep.is_zero() {
                tokio::time::sleep(self.config.sleep).await;
            }
        }

        tracing::info!(
            "✅ Processed {} zoos: {} ok, {} HTTP errors, {} other errors",
            summary.processed,
            summary.succeeded,
            summary.http_failures,
            summary.other_failures
        );
        summary
    }
}
