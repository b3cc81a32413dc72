//! Reader for navis line-tagged transcription files.
//!
//! Each input line holds one annotation with `<txt>`, `<id>`, `<user>` and
//! `<time>` sections. The id packs page, line and geometry values as
//! `key=value` pairs separated by `-`, for example
//! `navis-NL_HaNA_H2_7823_0001-line-3-y1=120-y2=180-zone-2-x=10-y=4-w=55-h=50`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::core::error::Result;
use crate::core::model::{AnnotationRecord, Field, PageContext};
use crate::parser::{Ingested, RecordSource};

#[derive(Debug, Default)]
pub struct NavisReader;

impl NavisReader {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSource for NavisReader {
    fn read_path(&self, path: &Path) -> Result<Ingested> {
        let file = File::open(path)?;
        let records = parse_reader(BufReader::new(file))?;
        info!("read {} navis records from {}", records.len(), path.display());
        Ok(Ingested {
            context: PageContext {
                page_id: records
                    .iter()
                    .find_map(|r| r.get(Field::PageId))
                    .map(str::to_string),
                ..Default::default()
            },
            records,
        })
    }
}

pub fn parse_reader(reader: impl BufRead) -> Result<Vec<AnnotationRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(&line, records.len()));
    }
    Ok(records)
}

pub fn parse_str(input: &str) -> Vec<AnnotationRecord> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(position, line)| parse_line(line, position))
        .collect()
}

/// Content between the first `<tag>` and the first `</tag>`; empty content
/// counts as absent.
fn tagged<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = line.find(&open)? + open.len();
    let end = line.find(&close)?;
    (start < end).then(|| &line[start..end])
}

pub fn parse_line(line: &str, position: usize) -> AnnotationRecord {
    let mut record = AnnotationRecord::new(position);

    if let Some(text) = tagged(line, "txt") {
        record = record.with(Field::Text, text);
    }
    if let Some(id) = tagged(line, "id") {
        record = parse_id(record.with(Field::Id, id), id);
    }
    if let Some(user) = tagged(line, "user") {
        record = record.with(Field::User, user);
    }
    if let Some(time) = tagged(line, "time") {
        record = record.with(Field::Time, time);
    }

    debug!("record {position}: {} fields", record.len());
    record
}

fn parse_id(mut record: AnnotationRecord, id: &str) -> AnnotationRecord {
    let mut tokens = id.split(['-', '=']).filter(|token| !token.is_empty());

    while let Some(token) = tokens.next() {
        let field = match token {
            t if t.trim() == "navis" => Field::PageId,
            "line" => Field::LineId,
            "y1" => Field::Y1,
            "y2" => Field::Y2,
            "zone" => Field::ZoneId,
            "x" => Field::X,
            "y" => Field::Y,
            "w" => Field::W,
            "h" => Field::H,
            _ => continue,
        };
        if let Some(value) = tokens.next() {
            record = record.with(field, value);
        }
        if field == Field::H {
            // whatever follows the height value is kept verbatim
            if let Some(next) = tokens.next() {
                if let Some(pos) = id.rfind(next).filter(|pos| *pos > 0) {
                    record = record.with(Field::TrailingTags, id[pos..].trim());
                }
            }
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WORD: &str = "<txt>hello</txt><id>navis-p7-line-3-y1=120-y2=180-zone-2-x=10-y=4-w=55-h=50</id><user>jan</user><time>2011-05-04</time>";

    #[test]
    fn parses_word_zone_line() {
        let record = parse_line(WORD, 0);
        assert_eq!(record.get(Field::Text), Some("hello"));
        assert_eq!(record.get(Field::PageId), Some("p7"));
        assert_eq!(record.get(Field::LineId), Some("3"));
        assert_eq!(record.get(Field::Y1), Some("120"));
        assert_eq!(record.get(Field::Y2), Some("180"));
        assert_eq!(record.get(Field::ZoneId), Some("2"));
        assert_eq!(record.get(Field::X), Some("10"));
        assert_eq!(record.get(Field::Y), Some("4"));
        assert_eq!(record.get(Field::W), Some("55"));
        assert_eq!(record.get(Field::H), Some("50"));
        assert_eq!(record.get(Field::User), Some("jan"));
        assert_eq!(record.get(Field::Time), Some("2011-05-04"));
        assert_eq!(record.get(Field::TrailingTags), None);
        assert!(record.is_word_zone());
    }

    #[test]
    fn keeps_trailing_tags_after_height() {
        let record = parse_line(
            "<id>navis-p7-line-3-y1=1-y2=2-zone-1-x=0-y=0-w=5-h=6-abbr-deleted</id>",
            0,
        );
        assert_eq!(record.get(Field::H), Some("6"));
        assert_eq!(record.get(Field::TrailingTags), Some("abbr-deleted"));
    }

    #[test]
    fn line_record_has_no_x() {
        let record = parse_line("<txt>the cat</txt><id>navis-p7-line-12-y1=10-y2=30</id>", 0);
        assert!(!record.is_word_zone());
        assert_eq!(record.get(Field::LineId), Some("12"));
        assert_eq!(record.get(Field::Id), Some("navis-p7-line-12-y1=10-y2=30"));
    }

    #[test]
    fn empty_sections_are_absent() {
        let record = parse_line("<txt></txt><id>navis-p-line-1-y1=0-y2=1</id>", 0);
        assert_eq!(record.get(Field::Text), None);
    }

    #[test]
    fn reader_skips_blank_lines_and_numbers_records() {
        let input = format!("{WORD}\n\n{WORD}\n");
        let records = parse_reader(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].position(), 1);
        assert_eq!(parse_str(&input), records);
    }
}
