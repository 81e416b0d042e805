use crate::domain::model::ZooIdSource;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use csv::ReaderBuilder;

pub const ZOO_ID_COLUMN: &str = "zoo_id";

/// 決定這次要處理哪些動物園，在任何網路請求之前執行
pub async fn resolve_zoo_ids<S: Storage>(source: &ZooIdSource, storage: &S) -> Result<Vec<i64>> {
    match source {
        ZooIdSource::Single(zoo_id) => Ok(vec![*zoo_id]),
        ZooIdSource::Locations {
            path,
            offset,
            limit,
        } => {
            let path = path.to_string_lossy();
            let data = storage.read_file(&path).await?;
            let ids = read_zoo_ids(&data, &path)?;
            tracing::debug!("Read {} zoo IDs from {}", ids.len(), path);
            Ok(window(ids, *offset, *limit))
        }
    }
}

/// 讀取 CSV 中 `zoo_id` 欄位，空白或非數字的值略過
pub fn read_zoo_ids(data: &[u8], path: &str) -> Result<Vec<i64>> {
    let data = data.strip_prefix("\u{feff}".as_bytes()).unwrap_or(data);
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(data);

    let column = reader
        .headers()?
        .iter()
        .position(|name| name == ZOO_ID_COLUMN)
        .ok_or_else(|| EtlError::MissingColumn {
            path: path.to_string(),
            column: ZOO_ID_COLUMN.to_string(),
        })?;

    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(value) = record.get(column).map(str::trim) else {
            continue;
        };
        if let Ok(zoo_id) = value.parse::<i64>() {
            ids.push(zoo_id);
        }
    }
    Ok(ids)
}

/// 取 `[offset, offset + limit)` 的區段，offset 小於 0 視為 0
pub fn window(ids: Vec<i64>, offset: i64, limit: Option<usize>) -> Vec<i64> {
    let start = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
    let skipped = ids.into_iter().skip(start);
    match limit {
        Some(limit) => skipped.take(limit).collect(),
        None => skipped.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalStorage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_read_zoo_ids_in_file_order() {
        let csv = b"zoo_id,latitude,longitude\r\n30,1.0,2.0\r\n10,3.0,4.0\r\n20,5.0,6.0\r\n";
        assert_eq!(read_zoo_ids(csv, "zoos.csv").unwrap(), vec![30, 10, 20]);
    }

    #[test]
    fn test_blank_and_non_numeric_values_are_skipped() {
        let csv = "name,zoo_id\nBerlin,1\nWien,\nZürich,abc\nBasel, 4 \nshort\n";
        assert_eq!(read_zoo_ids(csv.as_bytes(), "zoos.csv").unwrap(), vec![1, 4]);
    }

    #[test]
    fn test_missing_column_is_config_error() {
        let err = read_zoo_ids(b"id,latitude\n1,2.0\n", "zoos.csv").unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn { .. }));
        assert_eq!(err.exit_code(), 1);

        let err = read_zoo_ids(b"", "empty.csv").unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn { .. }));
    }

    #[test]
    fn test_leading_bom_is_tolerated() {
        let csv = "\u{feff}zoo_id\n5\n";
        assert_eq!(read_zoo_ids(csv.as_bytes(), "zoos.csv").unwrap(), vec![5]);
    }

    #[test]
    fn test_window_offset_and_limit() {
        let ids: Vec<i64> = (100..110).collect();
        assert_eq!(window(ids.clone(), 3, Some(2)), vec![103, 104]);
        assert_eq!(window(ids.clone(), 8, None), vec![108, 109]);
        assert_eq!(window(ids.clone(), -5, Some(1)), vec![100]);
        assert_eq!(window(ids.clone(), 0, None), ids);
        assert!(window(ids.clone(), 20, None).is_empty());
        assert!(window(ids, 0, Some(0)).is_empty());
    }

    #[tokio::test]
    async fn test_resolve_single_id() {
        let storage = LocalStorage::default();
        let ids = resolve_zoo_ids(&ZooIdSource::Single(10003612), &storage).await.unwrap();
        assert_eq!(ids, vec![10003612]);
    }

    #[tokio::test]
    async fn test_resolve_windowed_locations_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("zoo_locations.csv");
        std::fs::write(&path, "zoo_id,latitude,longitude\n1,0.0,0.0\n2,0.0,0.0\n3,0.0,0.0\n").unwrap();

        let source = ZooIdSource::Locations {
            path: path.clone(),
            offset: 1,
            limit: None,
        };
        let ids = resolve_zoo_ids(&source, &LocalStorage::default()).await.unwrap();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_resolve_missing_file_is_io_error() {
        let source = ZooIdSource::Locations {
            path: PathBuf::from("/nonexistent/zoo_locations.csv"),
            offset: 0,
            limit: None,
        };
        let err = resolve_zoo_ids(&source, &LocalStorage::default()).await.unwrap_err();
        assert!(matches!(err, EtlError::IoError(_)));
    }
}
