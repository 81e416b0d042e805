pub mod art_ids;
pub mod etl;
pub mod feed;
pub mod format;
pub mod selection;

pub use crate::domain::model::{ArtRecord, LoadReport, ParsedFeed, ZooIdSource, ZooLocation};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
