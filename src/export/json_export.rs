use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::core::index::{Conversion, InputMode, LineEntry};
use crate::core::model::{PageContext, TextSegment};
use crate::export::{Destination, Exporter};

#[derive(Debug, Serialize)]
struct ConversionView<'a> {
    page_id: Option<&'a str>,
    mode: InputMode,
    context: &'a PageContext,
    page: &'a TextSegment,
    lines: Vec<LineEntry<'a>>,
}

impl<'a> ConversionView<'a> {
    fn new(conversion: &'a Conversion) -> Self {
        Self {
            page_id: conversion.page_id(),
            mode: conversion.mode,
            context: &conversion.context,
            page: conversion.model.page(),
            lines: conversion.model.entries().collect(),
        }
    }
}

/// Writes the derived page model: page segment, then lines in order with
/// their line segment and word zones.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    destination: Destination,
}

impl JsonExporter {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }

    pub fn render(conversion: &Conversion) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ConversionView::new(conversion))?)
    }
}

impl Exporter for JsonExporter {
    fn export(&self, conversion: &Conversion) -> Result<()> {
        let data = Self::render(conversion)?;
        let mut out = self.destination.open()?;
        writeln!(out, "{data}")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{AnnotationRecord, Field};
    use crate::derive::{ModelDeriver, OffsetDeriver};

    #[test]
    fn renders_lines_with_segments_and_words() {
        let records = vec![
            AnnotationRecord::new(0)
                .with(Field::PageId, "p")
                .with(Field::LineId, "2")
                .with(Field::Y1, "10")
                .with(Field::Y2, "20")
                .with(Field::Text, "hi"),
        ];
        let conversion = Conversion {
            model: OffsetDeriver::new().derive(records).unwrap(),
            context: PageContext::default(),
            mode: InputMode::Navis,
        };
        let value: serde_json::Value =
            serde_json::from_str(&JsonExporter::render(&conversion).unwrap()).unwrap();

        assert_eq!(value["page_id"], "p");
        assert_eq!(value["mode"], "navis");
        assert_eq!(value["page"]["text"], "hi");
        assert_eq!(value["lines"][0]["id"], "p-002");
        assert_eq!(value["lines"][0]["segment"]["y"], 10);
        assert_eq!(value["lines"][0]["segment"]["text_offset"], 0);
        assert_eq!(value["lines"][0]["words"].as_array().map(Vec::len), Some(0));
    }
}
