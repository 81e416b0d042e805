pub mod pipelines;

use crate::adapters::LocalStorage;
use crate::config::{ArtsConfig, LocationsConfig};
use crate::core::etl::EtlEngine;
use crate::core::selection::resolve_zoo_ids;
use crate::domain::model::{BatchSummary, LoadReport, ZooIdSource};
use crate::utils::error::{EtlError, Result};
use pipelines::{ArtsBatch, LocationsPipeline};

/// 抓取動物園座標並寫出 `config.out`
pub async fn run_locations(config: LocationsConfig) -> Result<LoadReport> {
    let pipeline = LocationsPipeline::new(LocalStorage::default(), config)?;
    EtlEngine::new(pipeline).run().await
}

/// 先解析要處理的 ID，再逐一抓取；ID 清單為空時回傳 `EmptySelection`
pub async fn run_arts(source: &ZooIdSource, config: ArtsConfig) -> Result<BatchSummary> {
    let zoo_ids = resolve_zoo_ids(source, &LocalStorage::default()).await?;
    if zoo_ids.is_empty() {
        return Err(EtlError::EmptySelection);
    }

    tracing::info!(
        "🚀 Fetching {} zoo(s), haltung={}, output in {}",
        zoo_ids.len(),
        config.holdings.as_form_value(),
        config.out_dir.display()
    );

    let storage = LocalStorage::new(config.out_dir.clone());
    let batch = ArtsBatch::new(storage, config)?;
    Ok(batch.run(&zoo_ids).await)
}
