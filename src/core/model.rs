use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::error::{Error, Result};
use crate::core::geometry::Region;

/// Named fields carried by a flat annotation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Field {
    Id,
    Text,
    User,
    Time,
    PageId,
    LineId,
    Y1,
    Y2,
    ZoneId,
    X,
    Y,
    W,
    H,
    TrailingTags,
    LineImageUrl,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Text => "TXT",
            Field::User => "USER",
            Field::Time => "TIME",
            Field::PageId => "PAGE_ID",
            Field::LineId => "LINE_ID",
            Field::Y1 => "Y1",
            Field::Y2 => "Y2",
            Field::ZoneId => "ZONE_ID",
            Field::X => "X",
            Field::Y => "Y",
            Field::W => "W",
            Field::H => "H",
            Field::TrailingTags => "TRAILING_TAGS",
            Field::LineImageUrl => "LINE_IMAGE_URL",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ingested annotation: a flat field → string mapping plus its position
/// in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRecord {
    position: usize,
    fields: BTreeMap<Field, String>,
}

impl AnnotationRecord {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A record with an explicit horizontal position describes a word zone;
    /// anything else is a line.
    pub fn is_word_zone(&self) -> bool {
        self.contains(Field::X)
    }

    pub fn require(&self, field: Field) -> Result<&str> {
        self.get(field).ok_or(Error::MissingField {
            record: self.position,
            field,
        })
    }

    pub fn int(&self, field: Field) -> Result<i32> {
        let raw = self.require(field)?;
        raw.trim().parse().map_err(|_| Error::InvalidNumber {
            record: self.position,
            field,
            value: raw.to_string(),
        })
    }
}

/// Width of the numeric line suffix in a global line id.
pub const LINE_ID_WIDTH: usize = 3;

/// `<pageId>-<lineId>` with the line id left-padded to three digits.
/// Ordering between lines uses only the numeric value of the last three
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobalLineId {
    id: String,
    ordinal: u32,
}

impl GlobalLineId {
    pub fn new(page_id: &str, line_id: &str) -> Result<Self> {
        let padding = LINE_ID_WIDTH.saturating_sub(line_id.chars().count());
        let id = format!("{page_id}-{}{line_id}", "0".repeat(padding));
        let suffix: String = {
            let chars: Vec<char> = id.chars().collect();
            chars[chars.len() - LINE_ID_WIDTH..].iter().collect()
        };
        let ordinal = suffix
            .parse()
            .map_err(|_| Error::InvalidLineId(id.clone()))?;
        Ok(Self { id, ordinal })
    }

    pub fn from_record(record: &AnnotationRecord) -> Result<Self> {
        let line_id = record.require(Field::LineId)?;
        Self::new(record.get(Field::PageId).unwrap_or_default(), line_id)
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

impl fmt::Display for GlobalLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl Serialize for GlobalLineId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

/// Page-scoped ordering key for one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Line {
    pub id: GlobalLineId,
}

impl Line {
    pub fn new(id: GlobalLineId) -> Self {
        Self { id }
    }

    pub fn ordinal(&self) -> u32 {
        self.id.ordinal()
    }
}

/// Geometry and text of one page, line or word zone, with its location in
/// the full page text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSegment {
    #[serde(flatten)]
    pub region: Region,
    pub text: Option<String>,
    pub text_offset: Option<usize>,
    pub text_range: usize,
    /// Index of the originating record; `None` for synthesized segments.
    #[serde(skip)]
    pub source: Option<usize>,
}

impl TextSegment {
    pub fn new(region: Region, text: Option<String>, source: Option<usize>) -> Self {
        Self {
            region,
            text,
            text_offset: None,
            text_range: 0,
            source,
        }
    }

    pub fn text_str(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Length of the text in characters, the unit of all offsets.
    pub fn char_len(&self) -> usize {
        self.text_str().chars().count()
    }
}

/// Page facts discovered while ingesting, shared by every stage of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContext {
    pub page_id: Option<String>,
    /// Image of the cut-out text block (line-strip input only).
    pub block_image: Option<String>,
    pub scan_width: i32,
    pub scan_height: i32,
    pub rotation: i32,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Canvas size (width, height) supplied by the input itself.
    pub canvas: Option<(i32, i32)>,
}
