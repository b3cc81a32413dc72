use std::io::Write;

use anyhow::Result;

use crate::core::index::Conversion;
use crate::export::{Destination, Exporter};

/// Writes the concatenated page text.
#[derive(Debug, Clone)]
pub struct TextExporter {
    destination: Destination,
}

impl TextExporter {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }
}

impl Exporter for TextExporter {
    fn export(&self, conversion: &Conversion) -> Result<()> {
        let mut out = self.destination.open()?;
        writeln!(out, "{}", conversion.model.page_text())?;
        out.flush()?;
        Ok(())
    }
}
