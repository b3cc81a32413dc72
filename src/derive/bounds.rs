use log::{debug, info};

use crate::core::error::Result;
use crate::core::geometry::Region;
use crate::core::index::{LineIndex, PageModel};
use crate::core::model::{AnnotationRecord, Field, TextSegment};
use crate::derive::align::align_words;

/// Joins words within a line and lines within a page. All offset arithmetic
/// assumes it is exactly one character long.
pub const SEPARATOR: char = ' ';
pub const SEPARATOR_LEN: usize = 1;

/// What one line adds to the page text and page bounds.
#[derive(Debug, Clone, PartialEq)]
struct LineContribution {
    text: String,
    bounds: Region,
}

/// Walks the lines in order, assigning character offsets and ranges to
/// every segment, then synthesizes the page segment.
pub fn derive_page(mut index: LineIndex) -> Result<PageModel> {
    let mut running = 0usize;
    let mut page_text = String::new();
    let mut page_width: Option<i32> = None;
    let mut page_height: Option<i32> = None;
    let mut contributing = 0usize;

    for idx in 0..index.lines().len() {
        let Some((line, segment, words, records)) = index.line_parts_mut(idx) else {
            break;
        };
        let contribution = match (segment, words) {
            (Some(segment), words) => authoritative_line(segment, words, &mut running),
            (None, Some(words)) => word_only_line(words, records, &mut running)?,
            (None, None) => continue,
        };
        debug!("line {}: '{}' {:?}", line.id, contribution.text, contribution.bounds);

        if let Some(width) = contribution.bounds.width {
            page_width = Some(page_width.map_or(width, |w| w.max(width)));
        }
        let bottom = contribution.bounds.bottom();
        page_height = Some(page_height.map_or(bottom, |h| h.max(bottom)));

        if contributing > 0 {
            page_text.push(SEPARATOR);
        }
        page_text.push_str(&contribution.text);
        contributing += 1;
    }

    let mut page = TextSegment::new(
        Region::new(0, 0, page_width, page_height.unwrap_or(0)),
        Some(page_text),
        None,
    );
    page.text_offset = Some(0);
    page.text_range = running.saturating_sub(SEPARATOR_LEN);

    info!(
        "derived {} lines, page text {} chars, page bounds {:?}x{}",
        contributing, page.text_range, page.region.width, page.region.height
    );
    Ok(PageModel::new(index, page))
}

/// Line text is the concatenation of its word zones.
fn word_only_line(
    words: &mut [TextSegment],
    records: &[AnnotationRecord],
    running: &mut usize,
) -> Result<LineContribution> {
    let mut texts = Vec::with_capacity(words.len());
    let mut top: Option<i32> = None;
    let mut bottom: Option<i32> = None;
    let mut width: Option<i32> = None;

    for word in words.iter_mut() {
        if let Some(record) = word.source.and_then(|idx| records.get(idx)) {
            let y1 = record.int(Field::Y1)?;
            let y2 = record.int(Field::Y2)?;
            top = Some(top.map_or(y1, |t| t.min(y1)));
            bottom = Some(bottom.map_or(y2, |b| b.max(y2)));
        }
        if let Some(right) = word.region.right() {
            width = Some(width.map_or(right, |w| w.max(right)));
        }

        word.text_offset = Some(*running);
        word.text_range = word.char_len();
        *running += word.text_range + SEPARATOR_LEN;
        texts.push(word.text_str().to_string());
    }

    let top = top.unwrap_or_default();
    let height = bottom.map_or(0, |b| b.saturating_sub(top));
    Ok(LineContribution {
        text: texts.join(&SEPARATOR.to_string()),
        bounds: Region::new(0, top, width, height),
    })
}

/// The line record's text is ground truth; word zones are aligned against it.
fn authoritative_line(
    segment: &mut TextSegment,
    words: Option<&mut [TextSegment]>,
    running: &mut usize,
) -> LineContribution {
    let line_offset = *running;
    segment.text_offset = Some(line_offset);
    segment.text_range = segment.char_len();
    *running += segment.text_range + SEPARATOR_LEN;

    let mut width = None;
    if let Some(words) = words {
        let aligned = align_words(segment.text_str(), line_offset, words);
        debug!(
            "aligned {} of {} word zones",
            aligned.matched,
            aligned.matched + aligned.unmatched
        );
        width = words.iter().filter_map(|w| w.region.right()).max();
        if segment.region.width.is_none() {
            segment.region.width = width;
        }
    }

    LineContribution {
        text: segment.text_str().to_string(),
        bounds: Region::new(0, segment.region.y, width, segment.region.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::classify::index_records;
    use pretty_assertions::assert_eq;

    fn line(pos: usize, line: &str, y1: i32, y2: i32, text: Option<&str>) -> AnnotationRecord {
        let record = AnnotationRecord::new(pos)
            .with(Field::PageId, "p")
            .with(Field::LineId, line)
            .with(Field::Y1, y1.to_string())
            .with(Field::Y2, y2.to_string());
        match text {
            Some(text) => record.with(Field::Text, text),
            None => record,
        }
    }

    fn word(pos: usize, line: &str, x: i32, w: i32, y1: i32, y2: i32, text: &str) -> AnnotationRecord {
        AnnotationRecord::new(pos)
            .with(Field::PageId, "p")
            .with(Field::LineId, line)
            .with(Field::Y1, y1.to_string())
            .with(Field::Y2, y2.to_string())
            .with(Field::X, x.to_string())
            .with(Field::Y, "0")
            .with(Field::W, w.to_string())
            .with(Field::H, (y2 - y1).to_string())
            .with(Field::Text, text)
    }

    #[test]
    fn word_only_lines_concatenate() {
        let index = index_records(vec![
            word(0, "1", 50, 30, 0, 20, "sat"),
            word(1, "1", 0, 30, 2, 22, "cat"),
            word(2, "2", 0, 30, 30, 50, "mat"),
        ])
        .unwrap();
        let model = derive_page(index).unwrap();

        assert_eq!(model.page_text(), "cat sat mat");
        assert_eq!(model.page().text_range, 11);
        assert_eq!(model.page().region, Region::new(0, 0, Some(80), 50));

        let offsets: Vec<_> = model
            .entries()
            .flat_map(|entry| entry.words.iter().map(|w| (w.text_offset, w.text_range)))
            .collect();
        assert_eq!(offsets, vec![(Some(0), 3), (Some(4), 3), (Some(8), 3)]);
    }

    #[test]
    fn word_only_line_height_spans_all_words() {
        let index = index_records(vec![
            word(0, "1", 0, 10, 5, 20, "a"),
            word(1, "1", 20, 10, 2, 18, "b"),
        ])
        .unwrap();
        let model = derive_page(index).unwrap();
        assert_eq!(model.page().region.height, 20);
    }

    #[test]
    fn empty_line_text_reserves_one_separator() {
        let index = index_records(vec![
            line(0, "1", 0, 10, Some("ab")),
            line(1, "2", 10, 20, None),
            line(2, "3", 20, 30, Some("cd")),
        ])
        .unwrap();
        let model = derive_page(index).unwrap();

        assert_eq!(model.page_text(), "ab  cd");
        let lines: Vec<_> = model
            .entries()
            .map(|e| {
                let seg = e.segment.unwrap();
                (seg.text_offset, seg.text_range)
            })
            .collect();
        assert_eq!(lines, vec![(Some(0), 2), (Some(3), 0), (Some(4), 2)]);
        assert_eq!(model.page().text_range, model.page_text().chars().count());
    }

    #[test]
    fn line_width_comes_from_word_zones() {
        let index = index_records(vec![
            line(0, "1", 10, 30, Some("hello world")),
            word(1, "1", 0, 40, 10, 30, "hello"),
            word(2, "1", 45, 40, 10, 30, "world"),
        ])
        .unwrap();
        let model = derive_page(index).unwrap();
        let entry = model.entries().next().unwrap();

        assert_eq!(entry.segment.unwrap().region.width, Some(85));
        assert_eq!(model.page().region, Region::new(0, 0, Some(85), 30));
    }

    #[test]
    fn line_records_only_leave_page_width_unset() {
        let index = index_records(vec![line(0, "1", 10, 30, Some("x"))]).unwrap();
        let model = derive_page(index).unwrap();
        assert_eq!(model.page().region, Region::new(0, 0, None, 30));
    }

    #[test]
    fn empty_input_yields_empty_page() {
        let model = derive_page(LineIndex::new()).unwrap();
        assert_eq!(model.page_text(), "");
        assert_eq!(model.page().text_range, 0);
        assert_eq!(model.page().text_offset, Some(0));
    }

    #[test]
    fn extreme_word_heights_clamp_instead_of_wrapping() {
        let index = index_records(vec![
            word(0, "1", 0, 10, -2_000_000_000, 0, "a"),
            word(1, "1", 20, 10, 0, 2_000_000_000, "b"),
        ])
        .unwrap();
        let model = derive_page(index).unwrap();
        assert_eq!(model.page().region.height, i32::MAX - 2_000_000_000);
    }

    #[test]
    fn word_only_line_requires_y2() {
        let record = AnnotationRecord::new(0)
            .with(Field::PageId, "p")
            .with(Field::LineId, "1")
            .with(Field::Y1, "0")
            .with(Field::X, "0")
            .with(Field::Y, "0")
            .with(Field::W, "5")
            .with(Field::H, "5")
            .with(Field::Text, "a");
        let index = index_records(vec![record]).unwrap();
        assert!(derive_page(index).is_err());
    }
}
