pub mod arts_pipeline;
pub mod locations_pipeline;

pub use arts_pipeline::{ArtsBatch, ZooArtsPipeline};
pub use locations_pipeline::LocationsPipeline;

use crate::utils::error::{EtlError, Result};

/// 產生 CSV 內容；沿用 CRLF 行尾
pub(crate) fn csv_bytes<H, R, I>(header: H, rows: R) -> Result<Vec<u8>>
where
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
    R: IntoIterator<Item = I>,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
