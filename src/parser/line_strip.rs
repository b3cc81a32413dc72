//! Reader for line-strip XML produced by the block cut-out service.
//!
//! ```xml
//! <start_process_cutout>
//!   <page_image_original>http://host/page.jpg</page_image_original>
//!   <page_image_cutout>http://host/block.jpg</page_image_cutout>
//!   <width>2000</width><height>3000</height><angle>2</angle>
//!   <x1>100</x1><y1>200</y1><x2>900</x2><y2>1200</y2>
//!   <linestrips>
//!     <linestrip><id>1</id><y1>0</y1><y2>40</y2><line_image>http://host/l1.jpg</line_image></linestrip>
//!   </linestrips>
//! </start_process_cutout>
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::error::{Error, Result};
use crate::core::model::{AnnotationRecord, Field, PageContext};
use crate::parser::{Ingested, RecordSource};

const CUTOUT: &str = "start_process_cutout";
const LINE_STRIP: &str = "linestrip";

#[derive(Debug, Default)]
pub struct LineStripReader;

impl LineStripReader {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSource for LineStripReader {
    fn read_path(&self, path: &Path) -> Result<Ingested> {
        let xml = fs::read_to_string(path)?;
        let ingested = parse_str(&xml)?;
        info!(
            "read {} line strips from {}",
            ingested.records.len(),
            path.display()
        );
        Ok(ingested)
    }
}

fn parse_int(element: &str, value: &str) -> Result<i32> {
    value.trim().parse().map_err(|_| Error::InvalidElement {
        element: element.to_string(),
        value: value.to_string(),
    })
}

fn apply_cutout_field(context: &mut PageContext, canvas: &mut (Option<i32>, Option<i32>), element: &str, text: String) -> Result<()> {
    match element {
        "page_image_original" => context.page_id = Some(text),
        "page_image_cutout" => context.block_image = Some(text),
        "width" => context.scan_width = parse_int(element, &text)?,
        "height" => context.scan_height = parse_int(element, &text)?,
        "angle" => context.rotation = parse_int(element, &text)?,
        "x1" => context.origin_x = parse_int(element, &text)?,
        "y1" => context.origin_y = parse_int(element, &text)?,
        "x2" => canvas.0 = Some(parse_int(element, &text)?),
        "y2" => canvas.1 = Some(parse_int(element, &text)?),
        other => debug!("ignoring cut-out element <{other}>"),
    }
    Ok(())
}

fn strip_field(element: &str) -> Option<Field> {
    match element {
        "line_image" => Some(Field::LineImageUrl),
        "id" => Some(Field::LineId),
        "y1" => Some(Field::Y1),
        "y2" => Some(Field::Y2),
        _ => None,
    }
}

/// Parses the whole document. Line-strip records receive the page id once
/// the document has been read, wherever the page image element appears.
pub fn parse_str(xml: &str) -> Result<Ingested> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut context = PageContext::default();
    let mut canvas: (Option<i32>, Option<i32>) = (None, None);
    let mut strips: Vec<Vec<(Field, String)>> = Vec::new();
    let mut current: Option<Vec<(Field, String)>> = None;
    let mut stack: Vec<String> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|source| Error::Xml {
            position: reader.buffer_position(),
            source,
        })?;
        match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == LINE_STRIP {
                    current = Some(Vec::new());
                }
                stack.push(name);
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|source| Error::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?
                    .to_string();
                let depth = stack.len();
                if depth < 2 {
                    continue;
                }
                let element = stack[depth - 1].as_str();
                match stack[depth - 2].as_str() {
                    CUTOUT => apply_cutout_field(&mut context, &mut canvas, element, text)?,
                    LINE_STRIP => {
                        if let (Some(fields), Some(field)) = (current.as_mut(), strip_field(element)) {
                            fields.push((field, text));
                        }
                    }
                    _ => {}
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == LINE_STRIP.as_bytes() {
                    if let Some(fields) = current.take() {
                        strips.push(fields);
                    }
                }
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let (Some(width), Some(height)) = canvas {
        context.canvas = Some((width, height));
    }

    let records = strips
        .into_iter()
        .enumerate()
        .map(|(position, fields)| {
            let record = fields
                .into_iter()
                .fold(AnnotationRecord::new(position), |record, (field, value)| {
                    record.with(field, value)
                });
            match &context.page_id {
                Some(page_id) => record.with(Field::PageId, page_id.as_str()),
                None => record,
            }
        })
        .collect();

    Ok(Ingested { records, context })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<start_process_cutout>
  <status>ok</status>
  <page_image_original>http://img/page.jpg</page_image_original>
  <page_image_cutout>http://img/block.jpg</page_image_cutout>
  <width>2000</width>
  <height>3000</height>
  <angle>-2</angle>
  <x1>100</x1>
  <y1>200</y1>
  <x2>900</x2>
  <y2>1200</y2>
  <linestrips>
    <linestrip>
      <id>2</id>
      <y1>40</y1>
      <y2>80</y2>
      <line_image>http://img/l2.jpg</line_image>
    </linestrip>
    <linestrip>
      <id>1</id>
      <y1>0</y1>
      <y2>40</y2>
      <line_image>http://img/l1.jpg</line_image>
    </linestrip>
  </linestrips>
</start_process_cutout>"#;

    #[test]
    fn reads_cutout_context() {
        let ingested = parse_str(DOC).unwrap();
        assert_eq!(
            ingested.context,
            PageContext {
                page_id: Some("http://img/page.jpg".to_string()),
                block_image: Some("http://img/block.jpg".to_string()),
                scan_width: 2000,
                scan_height: 3000,
                rotation: -2,
                origin_x: 100,
                origin_y: 200,
                canvas: Some((900, 1200)),
            }
        );
    }

    #[test]
    fn reads_line_strips_as_line_records() {
        let ingested = parse_str(DOC).unwrap();
        assert_eq!(ingested.records.len(), 2);
        let first = &ingested.records[0];
        assert_eq!(first.get(Field::LineId), Some("2"));
        assert_eq!(first.get(Field::Y1), Some("40"));
        assert_eq!(first.get(Field::LineImageUrl), Some("http://img/l2.jpg"));
        assert_eq!(first.get(Field::PageId), Some("http://img/page.jpg"));
        assert!(!first.is_word_zone());
        assert_eq!(first.get(Field::Id), None);
    }

    #[test]
    fn rejects_non_numeric_dimensions() {
        let err = parse_str("<start_process_cutout><width>wide</width></start_process_cutout>")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidElement { element, .. } if element == "width"));
    }

    #[test]
    fn rejects_malformed_xml() {
        assert!(parse_str("<start_process_cutout><width>1</height>").is_err());
    }
}
