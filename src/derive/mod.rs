pub mod align;
pub mod bounds;
pub mod classify;

use log::info;

use crate::core::error::Result;
use crate::core::index::PageModel;
use crate::core::model::AnnotationRecord;

pub trait ModelDeriver {
    fn derive(&self, records: Vec<AnnotationRecord>) -> Result<PageModel>;
}

/// Classifies records into the line index, then derives offsets and bounds.
#[derive(Debug, Default)]
pub struct OffsetDeriver;

impl OffsetDeriver {
    pub fn new() -> Self {
        Self
    }
}

impl ModelDeriver for OffsetDeriver {
    fn derive(&self, records: Vec<AnnotationRecord>) -> Result<PageModel> {
        let count = records.len();
        let index = classify::index_records(records)?;
        info!("indexed {} records into {} lines", count, index.lines().len());
        bounds::derive_page(index)
    }
}
