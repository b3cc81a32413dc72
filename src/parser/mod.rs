pub mod line_strip;
pub mod navis;

pub use line_strip::LineStripReader;
pub use navis::NavisReader;

use std::path::Path;

use crate::core::error::Result;
use crate::core::model::{AnnotationRecord, PageContext};

/// Records read from one input file plus the page facts found alongside them.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub records: Vec<AnnotationRecord>,
    pub context: PageContext,
}

pub trait RecordSource {
    fn read_path(&self, path: &Path) -> Result<Ingested>;
}
