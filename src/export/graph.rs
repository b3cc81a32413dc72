use anyhow::{Context, Result};
use uuid::Uuid;

use crate::core::index::{Conversion, InputMode, PageModel};
use crate::core::model::{Field, TextSegment};
use crate::export::vocab::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Iri(String),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: &'static str,
    pub object: Object,
}

/// Triples in the order they were emitted.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iri(&mut self, subject: &str, predicate: &'static str, object: impl Into<String>) {
        self.triples.push(Triple {
            subject: subject.to_string(),
            predicate,
            object: Object::Iri(object.into()),
        });
    }

    pub fn literal(&mut self, subject: &str, predicate: &'static str, value: impl Into<String>) {
        self.triples.push(Triple {
            subject: subject.to_string(),
            predicate,
            object: Object::Literal(value.into()),
        });
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Objects of every triple matching `subject` and `predicate`.
    pub fn objects<'a>(&'a self, subject: &'a str, predicate: &'a str) -> impl Iterator<Item = &'a Object> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Subjects typed with `class`.
    pub fn instances_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.predicate == RDF_TYPE && t.object == Object::Iri(class.to_string()))
            .map(|t| t.subject.as_str())
    }
}

/// Source of fresh node identifiers.
pub trait NodeMinter {
    fn mint(&mut self) -> String;
}

#[derive(Debug, Default)]
pub struct UuidMinter;

impl NodeMinter for UuidMinter {
    fn mint(&mut self) -> String {
        format!("urn:uuid:{}", Uuid::new_v4())
    }
}

/// Numbered identifiers, for reproducible output.
#[derive(Debug, Default)]
pub struct SequentialMinter {
    next: usize,
}

impl NodeMinter for SequentialMinter {
    fn mint(&mut self) -> String {
        self.next += 1;
        format!("urn:node:{}", self.next)
    }
}

pub fn build_graph(conversion: &Conversion, minter: &mut impl NodeMinter) -> Result<Graph> {
    match conversion.mode {
        InputMode::Navis => text_graph(conversion, minter),
        InputMode::LineStrips => Ok(line_strip_graph(conversion, minter)),
    }
}

fn width_literal(width: Option<i32>) -> String {
    width.unwrap_or(-1).to_string()
}

/// Canvas, full text and image annotations for the page, then one
/// constrained annotation per line and word segment.
pub fn text_graph(conversion: &Conversion, minter: &mut impl NodeMinter) -> Result<Graph> {
    let page_id = conversion
        .page_id()
        .context("input records carry no page id")?;
    let model = &conversion.model;
    let page = model.page();
    let mut g = Graph::new();

    let canvas = format!("{CATCHPLUS}{page_id}");
    g.iri(&canvas, RDF_TYPE, SC_CANVAS);
    g.literal(&canvas, DC_TITLE, format!("Canvas for {page_id}"));
    g.literal(&canvas, EXIF_HEIGHT, page.region.height.to_string());
    g.literal(&canvas, EXIF_WIDTH, width_literal(page.region.width));

    let annotation = minter.mint();
    let full_text = minter.mint();
    g.iri(&annotation, RDF_TYPE, OAC_ANNOTATION);
    g.iri(&annotation, RDF_TYPE, CP_TEXT_ANNOTATION);
    g.iri(&annotation, OAC_HAS_BODY, full_text.as_str());
    g.iri(&annotation, OAC_HAS_TARGET, canvas.as_str());
    g.literal(&annotation, DC_TITLE, format!("Full text of page {page_id}"));

    g.iri(&full_text, RDF_TYPE, CNT_CONTENT_AS_TEXT);
    g.iri(&full_text, RDF_TYPE, OAC_BODY);
    g.literal(&full_text, CNT_CHARS, page.text_str());
    g.literal(&full_text, CNT_CHARACTER_ENCODING, "UTF-8");

    let image_annotation = minter.mint();
    g.iri(&image_annotation, RDF_TYPE, OAC_ANNOTATION);
    g.iri(&image_annotation, RDF_TYPE, CP_IMAGE_ANNOTATION);
    g.iri(&image_annotation, OAC_HAS_BODY, format!("{canvas}.jpg"));
    g.iri(&image_annotation, OAC_HAS_TARGET, canvas.as_str());
    g.literal(&image_annotation, DC_TITLE, format!("Image annotation of {page_id}"));

    for entry in model.entries() {
        if let Some(segment) = entry.segment {
            segment_triples(&mut g, model, segment, entry.id.as_str(), &canvas, &full_text, minter);
        }
        for word in entry.words {
            segment_triples(&mut g, model, word, "", &canvas, &full_text, minter);
        }
    }

    Ok(g)
}

fn segment_triples(
    g: &mut Graph,
    model: &PageModel,
    segment: &TextSegment,
    id: &str,
    canvas: &str,
    full_text: &str,
    minter: &mut impl NodeMinter,
) {
    let record = model.record_for(segment);
    let (kind, id) = match record {
        None => (CP_TEXT_ANNOTATION, id),
        Some(record) => match record.get(Field::Id) {
            None => (CP_LINESTRIP, id),
            Some(record_id) => (CP_MONK_ANNOTATION, record_id),
        },
    };

    let annotation = minter.mint();
    let body = minter.mint();
    let target = minter.mint();
    g.iri(&annotation, RDF_TYPE, OAC_ANNOTATION);
    g.iri(&annotation, RDF_TYPE, kind);
    g.iri(&annotation, OAC_HAS_BODY, body.as_str());
    g.iri(&annotation, OAC_HAS_TARGET, target.as_str());
    g.literal(&annotation, DC_TITLE, format!("Annotation for {id}"));
    g.literal(&annotation, DC_IDENTIFIER, id);

    if let Some(text) = &segment.text {
        g.literal(&annotation, CP_CHARS, text.as_str());
    }
    if let Some(record) = record {
        for (field, predicate) in [
            (Field::User, DCTERMS_CREATOR),
            (Field::Time, DCTERMS_CREATED),
            (Field::TrailingTags, CP_TRAILING_TAGS),
        ] {
            if let Some(value) = record.get(field) {
                g.literal(&annotation, predicate, value);
            }
        }
    }

    let text_constraint = minter.mint();
    g.iri(&body, RDF_TYPE, OAC_CONSTRAINED_BODY);
    g.iri(&body, OAC_CONSTRAINS, full_text);
    g.iri(&body, OAC_CONSTRAINED_BY, text_constraint.as_str());

    let offset = segment.text_offset.map_or(-1, |o| o as i64);
    g.iri(&text_constraint, RDF_TYPE, OAC_CONSTRAINT);
    g.iri(&text_constraint, RDF_TYPE, CP_INLINE_TEXT_CONSTRAINT);
    g.iri(&text_constraint, RDF_TYPE, CNT_CONTENT_AS_TEXT);
    g.literal(
        &text_constraint,
        CNT_CHARS,
        format!(
            "\"<textsegment offset=\"{offset}\" range=\"{}\"/>\"",
            segment.text_range
        ),
    );
    g.literal(&text_constraint, CNT_CHARACTER_ENCODING, "UTF-8");

    let svg_constraint = minter.mint();
    g.iri(&target, RDF_TYPE, OAC_CONSTRAINED_TARGET);
    g.iri(&target, OAC_CONSTRAINS, canvas);
    g.iri(&target, OAC_CONSTRAINED_BY, svg_constraint.as_str());

    g.iri(&svg_constraint, RDF_TYPE, OAC_CONSTRAINT);
    g.iri(&svg_constraint, RDF_TYPE, CP_SVG_CONSTRAINT);
    g.iri(&svg_constraint, RDF_TYPE, CNT_CONTENT_AS_TEXT);
    g.literal(&svg_constraint, DC_FORMAT, "image/svg+xml");
    g.literal(&svg_constraint, CP_CHARS, format!("\"{}\"", segment.region.svg_rect()));
    g.literal(&svg_constraint, CNT_CHARACTER_ENCODING, "UTF-8");
}

/// Canvas for the scan, a rotated region for the cut-out block, and one
/// line-strip annotation per line positioned inside that region.
pub fn line_strip_graph(conversion: &Conversion, minter: &mut impl NodeMinter) -> Graph {
    let context = &conversion.context;
    let page_id = conversion.page_id();
    let mut g = Graph::new();

    let canvas = minter.mint();
    g.iri(&canvas, RDF_TYPE, SC_CANVAS);
    g.literal(&canvas, DC_TITLE, format!("Canvas for {}", page_id.unwrap_or_default()));
    g.literal(&canvas, EXIF_HEIGHT, context.scan_height.to_string());
    g.literal(&canvas, EXIF_WIDTH, context.scan_width.to_string());

    if let Some(page_id) = page_id {
        let image_annotation = minter.mint();
        g.iri(&image_annotation, RDF_TYPE, OA_ANNOTATION);
        g.iri(&image_annotation, OA_HAS_BODY, page_id);
        g.iri(&image_annotation, OA_HAS_TARGET, canvas.as_str());
        g.literal(&image_annotation, DC_TITLE, format!("Image annotation of {page_id}"));
        g.iri(page_id, RDF_TYPE, DCTYPES_IMAGE);
    }

    let block_annotation = minter.mint();
    let block_region = minter.mint();
    let block_selector = minter.mint();
    g.iri(&block_annotation, RDF_TYPE, OA_ANNOTATION);
    g.iri(&block_annotation, RDF_TYPE, CP_LINESTRIP_REGION);
    g.iri(&block_annotation, OA_HAS_TARGET, block_region.as_str());

    g.iri(&block_region, RDF_TYPE, OA_SPECIFIC_RESOURCE);
    g.iri(&block_region, OA_HAS_SELECTOR, block_selector.as_str());
    g.iri(&block_region, OA_HAS_SOURCE, canvas.as_str());

    let (block_width, block_height) = context.canvas.unwrap_or((-1, -1));
    g.iri(&block_selector, RDF_TYPE, OAX_SVG_SELECTOR);
    g.iri(&block_selector, RDF_TYPE, CNT_CONTENT_AS_TEXT);
    g.literal(
        &block_selector,
        CNT_CHARS,
        format!(
            "\"<rect x=\"{}\" y=\"{}\" width=\"{block_width}\" height=\"{block_height}\" transform=\"rotate({},0,0)\"/>\"",
            context.origin_x, context.origin_y, context.rotation
        ),
    );
    g.literal(&block_selector, CNT_CHARACTER_ENCODING, "UTF-8");

    if let Some(block_image) = &context.block_image {
        let block_image_annotation = minter.mint();
        g.iri(&block_image_annotation, RDF_TYPE, OA_ANNOTATION);
        g.iri(&block_image_annotation, OA_HAS_BODY, block_image.as_str());
        g.iri(&block_image_annotation, OA_HAS_TARGET, block_region.as_str());
        g.iri(block_image, RDF_TYPE, DCTYPES_IMAGE);
    }

    let model = &conversion.model;
    for entry in model.entries() {
        let Some(segment) = entry.segment else {
            continue;
        };
        let record = model.record_for(segment);
        let line_id = record
            .and_then(|r| r.get(Field::LineId))
            .unwrap_or_default();
        let strip_id = format!(
            "{}/{}-{}/{}",
            page_id.unwrap_or_default(),
            context.origin_x,
            context.origin_y,
            line_id
        );

        let strip_annotation = minter.mint();
        let line_box = minter.mint();
        let line_selector = minter.mint();
        g.iri(&strip_annotation, RDF_TYPE, OA_ANNOTATION);
        g.iri(&strip_annotation, RDF_TYPE, CP_LINESTRIP);
        g.iri(&strip_annotation, OA_HAS_TARGET, line_box.as_str());
        g.literal(&strip_annotation, DC_IDENTIFIER, strip_id);

        g.iri(&line_box, RDF_TYPE, OA_SPECIFIC_RESOURCE);
        g.iri(&line_box, OA_HAS_SELECTOR, line_selector.as_str());
        g.iri(&line_box, OA_HAS_SOURCE, block_region.as_str());

        g.iri(&line_selector, RDF_TYPE, OAX_SVG_SELECTOR);
        g.iri(&line_selector, RDF_TYPE, CNT_CONTENT_AS_TEXT);
        g.literal(&line_selector, CNT_CHARS, format!("\"{}\"", segment.region.svg_rect()));
        g.literal(&line_selector, CNT_CHARACTER_ENCODING, "UTF-8");

        if let Some(image) = record.and_then(|r| r.get(Field::LineImageUrl)) {
            let strip_image_annotation = minter.mint();
            g.iri(&strip_image_annotation, RDF_TYPE, OA_ANNOTATION);
            g.iri(&strip_image_annotation, OA_HAS_BODY, image);
            g.iri(&strip_image_annotation, OA_HAS_TARGET, line_box.as_str());
            g.iri(image, RDF_TYPE, DCTYPES_IMAGE);
        }
    }

    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{AnnotationRecord, PageContext};
    use crate::derive::{ModelDeriver, OffsetDeriver};

    fn conversion(records: Vec<AnnotationRecord>, mode: InputMode, context: PageContext) -> Conversion {
        Conversion {
            model: OffsetDeriver::new().derive(records).unwrap(),
            context,
            mode,
        }
    }

    fn literal(g: &Graph, subject: &str, predicate: &str) -> String {
        match g.objects(subject, predicate).next() {
            Some(Object::Literal(value)) => value.clone(),
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn text_graph_types_segments_by_origin() {
        let records = vec![
            AnnotationRecord::new(0)
                .with(Field::PageId, "p9")
                .with(Field::LineId, "1")
                .with(Field::Y1, "0")
                .with(Field::Y2, "20")
                .with(Field::Text, "ab")
                .with(Field::Id, "navis-p9-line-1-y1=0-y2=20")
                .with(Field::User, "ann"),
            AnnotationRecord::new(1)
                .with(Field::PageId, "p9")
                .with(Field::LineId, "1")
                .with(Field::Y1, "0")
                .with(Field::Y2, "20")
                .with(Field::X, "0")
                .with(Field::Y, "0")
                .with(Field::W, "10")
                .with(Field::H, "20")
                .with(Field::Text, "zz")
                .with(Field::Id, "navis-p9-line-1-zone-1"),
        ];
        let conv = conversion(records, InputMode::Navis, PageContext::default());
        let g = text_graph(&conv, &mut SequentialMinter::default()).unwrap();

        let canvas = "http://www.catchplus.nl/annotation/p9";
        assert_eq!(literal(&g, canvas, EXIF_WIDTH), "10");
        assert_eq!(literal(&g, canvas, EXIF_HEIGHT), "20");
        assert_eq!(g.instances_of(CP_MONK_ANNOTATION).count(), 2);
        assert_eq!(g.instances_of(CP_TEXT_ANNOTATION).count(), 1);

        let monk: Vec<_> = g.instances_of(CP_MONK_ANNOTATION).collect();
        assert_eq!(literal(&g, monk[0], DC_IDENTIFIER), "navis-p9-line-1-y1=0-y2=20");
        assert_eq!(literal(&g, monk[0], DCTERMS_CREATOR), "ann");
        assert_eq!(g.objects(monk[1], DCTERMS_CREATOR).count(), 0);

        let constraints: Vec<_> = g.instances_of(CP_INLINE_TEXT_CONSTRAINT).collect();
        assert_eq!(
            literal(&g, constraints[1], CNT_CHARS),
            "\"<textsegment offset=\"-1\" range=\"2\"/>\""
        );
    }

    #[test]
    fn text_graph_requires_page_id() {
        let records = vec![AnnotationRecord::new(0)
            .with(Field::LineId, "1")
            .with(Field::Y1, "0")
            .with(Field::Y2, "1")];
        let conv = conversion(records, InputMode::Navis, PageContext::default());
        assert!(text_graph(&conv, &mut SequentialMinter::default()).is_err());
    }

    #[test]
    fn line_strip_graph_identifies_strips_by_block_origin() {
        let records = vec![AnnotationRecord::new(0)
            .with(Field::PageId, "http://img/p.jpg")
            .with(Field::LineId, "4")
            .with(Field::Y1, "10")
            .with(Field::Y2, "50")
            .with(Field::LineImageUrl, "http://img/l4.jpg")];
        let context = PageContext {
            page_id: Some("http://img/p.jpg".to_string()),
            origin_x: 12,
            origin_y: 34,
            rotation: 3,
            canvas: Some((800, 600)),
            ..Default::default()
        };
        let conv = conversion(records, InputMode::LineStrips, context);
        let g = build_graph(&conv, &mut SequentialMinter::default()).unwrap();

        let strips: Vec<_> = g.instances_of(CP_LINESTRIP).collect();
        assert_eq!(strips.len(), 1);
        assert_eq!(literal(&g, strips[0], DC_IDENTIFIER), "http://img/p.jpg/12-34/4");
        assert_eq!(g.instances_of(DCTYPES_IMAGE).count(), 2);

        let selectors: Vec<_> = g.instances_of(OAX_SVG_SELECTOR).collect();
        assert_eq!(
            literal(&g, selectors[0], CNT_CHARS),
            "\"<rect x=\"12\" y=\"34\" width=\"800\" height=\"600\" transform=\"rotate(3,0,0)\"/>\""
        );
        assert_eq!(
            literal(&g, selectors[1], CNT_CHARS),
            "\"<rect x=\"0\" y=\"10\" width=\"-1\" height=\"40\"/>\""
        );
    }
}
