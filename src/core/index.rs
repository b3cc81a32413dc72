use std::collections::HashMap;

use serde::Serialize;

use crate::core::model::{AnnotationRecord, GlobalLineId, Line, PageContext, TextSegment};
use crate::core::ordering::OrderedSet;

fn line_key(line: &Line) -> u32 {
    line.ordinal()
}

fn word_key(segment: &TextSegment) -> i32 {
    segment.region.x
}

/// Page-wide line order plus the segments attached to each line.
#[derive(Debug)]
pub struct LineIndex {
    page_id: Option<String>,
    records: Vec<AnnotationRecord>,
    lines: OrderedSet<Line, u32>,
    line_segments: HashMap<GlobalLineId, TextSegment>,
    word_segments: HashMap<GlobalLineId, OrderedSet<TextSegment, i32>>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIndex {
    pub fn new() -> Self {
        Self {
            page_id: None,
            records: Vec::new(),
            lines: OrderedSet::new(line_key),
            line_segments: HashMap::new(),
            word_segments: HashMap::new(),
        }
    }

    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    /// The first page id seen sticks for the rest of the run.
    pub fn observe_page_id(&mut self, page_id: Option<&str>) {
        if self.page_id.is_none() {
            self.page_id = page_id.map(str::to_string);
        }
    }

    pub fn add_record(&mut self, record: AnnotationRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn record(&self, idx: usize) -> Option<&AnnotationRecord> {
        self.records.get(idx)
    }

    pub fn register_line(&mut self, id: GlobalLineId) -> bool {
        self.lines.insert_unique(Line::new(id))
    }

    /// Sets the line segment for `id`, returning the one it replaced.
    pub fn set_line_segment(&mut self, id: GlobalLineId, segment: TextSegment) -> Option<TextSegment> {
        self.line_segments.insert(id, segment)
    }

    pub fn push_word(&mut self, id: GlobalLineId, segment: TextSegment) {
        self.word_segments
            .entry(id)
            .or_insert_with(|| OrderedSet::new(word_key))
            .insert(segment);
    }

    pub fn lines(&self) -> &[Line] {
        self.lines.as_slice()
    }

    pub fn line_segment(&self, id: &GlobalLineId) -> Option<&TextSegment> {
        self.line_segments.get(id)
    }

    pub fn words(&self, id: &GlobalLineId) -> &[TextSegment] {
        self.word_segments
            .get(id)
            .map(OrderedSet::as_slice)
            .unwrap_or_default()
    }

    /// Mutable access to one line's segments, in page order.
    pub(crate) fn line_parts_mut(
        &mut self,
        idx: usize,
    ) -> Option<(&Line, Option<&mut TextSegment>, Option<&mut [TextSegment]>, &[AnnotationRecord])> {
        let line = self.lines.as_slice().get(idx)?;
        let segment = self.line_segments.get_mut(&line.id);
        let words = self
            .word_segments
            .get_mut(&line.id)
            .map(OrderedSet::as_mut_slice);
        Some((line, segment, words, &self.records))
    }

    pub(crate) fn for_each_segment_mut(&mut self, mut f: impl FnMut(&mut TextSegment)) {
        for segment in self.line_segments.values_mut() {
            f(segment);
        }
        for words in self.word_segments.values_mut() {
            for segment in words.iter_mut() {
                f(segment);
            }
        }
    }
}

/// One line of the finished model as handed to exporters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineEntry<'a> {
    pub id: &'a GlobalLineId,
    pub segment: Option<&'a TextSegment>,
    pub words: &'a [TextSegment],
}

/// Derived model of one page: ordered lines with their segments and the
/// synthesized page segment covering the full page text.
#[derive(Debug)]
pub struct PageModel {
    index: LineIndex,
    page: TextSegment,
}

impl PageModel {
    pub fn new(index: LineIndex, page: TextSegment) -> Self {
        Self { index, page }
    }

    pub fn page_id(&self) -> Option<&str> {
        self.index.page_id()
    }

    pub fn page(&self) -> &TextSegment {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut TextSegment {
        &mut self.page
    }

    pub fn page_text(&self) -> &str {
        self.page.text_str()
    }

    pub fn index(&self) -> &LineIndex {
        &self.index
    }

    pub fn record_for(&self, segment: &TextSegment) -> Option<&AnnotationRecord> {
        segment.source.and_then(|idx| self.index.record(idx))
    }

    pub fn entries(&self) -> impl Iterator<Item = LineEntry<'_>> + '_ {
        self.index.lines().iter().map(move |line| LineEntry {
            id: &line.id,
            segment: self.index.line_segment(&line.id),
            words: self.index.words(&line.id),
        })
    }

    /// Every segment of the page: lines, word zones, then the page itself.
    pub fn for_each_segment_mut(&mut self, mut f: impl FnMut(&mut TextSegment)) {
        self.index.for_each_segment_mut(&mut f);
        f(&mut self.page);
    }
}

/// How the records of a run were ingested; selects the graph layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Navis,
    LineStrips,
}

/// Finished, transformed model of one run plus its page context.
#[derive(Debug)]
pub struct Conversion {
    pub model: PageModel,
    pub context: PageContext,
    pub mode: InputMode,
}

impl Conversion {
    pub fn page_id(&self) -> Option<&str> {
        self.context.page_id.as_deref().or(self.model.page_id())
    }
}
