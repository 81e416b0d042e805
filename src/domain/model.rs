use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZooLocation {
    pub zoo_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// 解析 feed 後的結果：有效資料與被丟棄的列數
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    pub locations: Vec<ZooLocation>,
    pub discarded: usize,
}

/// 一個動物園目前或曾經飼養的物種 (art) ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtRecord {
    pub zoo_id: i64,
    pub art_ids: BTreeSet<i64>,
}

impl ArtRecord {
    pub fn new(zoo_id: i64, art_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            zoo_id,
            art_ids: art_ids.into_iter().collect(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.zoo_id)
    }
}

/// haltung 參數：0 = 目前飼養，1 = 過去飼養
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Holdings {
    #[default]
    Current,
    Former,
}

impl Holdings {
    pub fn as_form_value(self) -> &'static str {
        match self {
            Holdings::Current => "0",
            Holdings::Former => "1",
        }
    }
}

impl TryFrom<u8> for Holdings {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Holdings::Current),
            1 => Ok(Holdings::Former),
            other => Err(format!("haltung must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Holdings> for u8 {
    fn from(value: Holdings) -> Self {
        match value {
            Holdings::Current => 0,
            Holdings::Former => 1,
        }
    }
}

/// 要處理的動物園 ID 來源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZooIdSource {
    Single(i64),
    Locations {
        path: PathBuf,
        offset: i64,
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub output_path: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub http_failures: usize,
    pub other_failures: usize,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.http_failures + self.other_failures
    }
}
