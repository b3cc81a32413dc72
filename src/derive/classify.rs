use log::warn;

use crate::core::error::{Error, Result};
use crate::core::geometry::Region;
use crate::core::index::LineIndex;
use crate::core::model::{AnnotationRecord, Field, GlobalLineId, TextSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Line,
    WordZone,
}

pub fn classify(record: &AnnotationRecord) -> RecordKind {
    if record.is_word_zone() {
        RecordKind::WordZone
    } else {
        RecordKind::Line
    }
}

/// Sorts every record into the line index. Fails on the first record that
/// lacks a line id or a geometry field its kind requires.
pub fn index_records(records: Vec<AnnotationRecord>) -> Result<LineIndex> {
    let mut index = LineIndex::new();
    for record in records {
        let id = GlobalLineId::from_record(&record)?;
        let kind = classify(&record);
        let segment = match kind {
            RecordKind::Line => line_segment(&record)?,
            RecordKind::WordZone => word_segment(&record)?,
        };

        index.observe_page_id(record.get(Field::PageId));
        let source = index.add_record(record);
        let segment = TextSegment {
            source: Some(source),
            ..segment
        };

        match kind {
            RecordKind::Line => {
                if index.set_line_segment(id.clone(), segment).is_some() {
                    warn!("line {id} has more than one line record, keeping the last");
                }
            }
            RecordKind::WordZone => index.push_word(id.clone(), segment),
        }
        index.register_line(id);
    }
    Ok(index)
}

/// Geometry that parses but cannot be combined without leaving the i32
/// range is reported against the second operand's field.
fn overflow(record: &AnnotationRecord, field: Field) -> Error {
    Error::InvalidNumber {
        record: record.position(),
        field,
        value: record.get(field).unwrap_or_default().to_string(),
    }
}

fn line_segment(record: &AnnotationRecord) -> Result<TextSegment> {
    let y1 = record.int(Field::Y1)?;
    let y2 = record.int(Field::Y2)?;
    let height = y2.checked_sub(y1).ok_or_else(|| overflow(record, Field::Y2))?;
    Ok(TextSegment::new(
        Region::band(y1, height),
        record.get(Field::Text).map(str::to_string),
        None,
    ))
}

fn word_segment(record: &AnnotationRecord) -> Result<TextSegment> {
    let x = record.int(Field::X)?;
    let y1 = record.int(Field::Y1)?;
    let y = record.int(Field::Y)?;
    let w = record.int(Field::W)?;
    let h = record.int(Field::H)?;
    let top = y1.checked_add(y).ok_or_else(|| overflow(record, Field::Y))?;
    x.checked_add(w).ok_or_else(|| overflow(record, Field::W))?;
    Ok(TextSegment::new(
        Region::new(x, top, Some(w), h),
        record.get(Field::Text).map(str::to_string),
        None,
    ))
}
