//! IRIs used in the emitted annotation graph.

pub const CATCHPLUS: &str = "http://www.catchplus.nl/annotation/";

pub const CP_TEXT_ANNOTATION: &str = "http://www.catchplus.nl/annotation/TextAnnotation";
pub const CP_MONK_ANNOTATION: &str = "http://www.catchplus.nl/annotation/MonkAnnotation";
pub const CP_LINESTRIP: &str = "http://www.catchplus.nl/annotation/LinestripAnnotation";
pub const CP_IMAGE_ANNOTATION: &str = "http://www.catchplus.nl/annotation/ImageAnnotation";
pub const CP_CHARS: &str = "http://www.catchplus.nl/annotation/chars";
pub const CP_INLINE_TEXT_CONSTRAINT: &str = "http://www.catchplus.nl/annotation/InlineTextConstraint";
pub const CP_SVG_CONSTRAINT: &str = "http://www.catchplus.nl/annotation/SvgConstraint";
pub const CP_TRAILING_TAGS: &str = "http://www.catchplus.nl/annotation/trailingTags";
pub const CP_LINESTRIP_REGION: &str = "http://www.catchplus.nl/annotation/LineStripRegion";

pub const SC_CANVAS: &str = "http://dms.stanford.edu/ns/Canvas";

pub const DC_TITLE: &str = "http://purl.org/dc/elements/1.1/title";
pub const DC_FORMAT: &str = "http://purl.org/dc/elements/1.1/format";
pub const DC_IDENTIFIER: &str = "http://purl.org/dc/elements/1.1/identifier";
pub const DCTERMS_CREATOR: &str = "http://purl.org/dc/terms/creator";
pub const DCTERMS_CREATED: &str = "http://purl.org/dc/terms/created";
pub const DCTYPES_IMAGE: &str = "http://purl.org/dc/dcmitype/Image";

pub const EXIF_HEIGHT: &str = "http://www.w3.org/2003/12/exif/ns#height";
pub const EXIF_WIDTH: &str = "http://www.w3.org/2003/12/exif/ns#width";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const OAC_ANNOTATION: &str = "http://www.openannotation.org/ns/Annotation";
pub const OAC_BODY: &str = "http://www.openannotation.org/ns/Body";
pub const OAC_HAS_BODY: &str = "http://www.openannotation.org/ns/hasBody";
pub const OAC_HAS_TARGET: &str = "http://www.openannotation.org/ns/hasTarget";
pub const OAC_CONSTRAINED_BODY: &str = "http://www.openannotation.org/ns/ConstrainedBody";
pub const OAC_CONSTRAINED_TARGET: &str = "http://www.openannotation.org/ns/ConstrainedTarget";
pub const OAC_CONSTRAINT: &str = "http://www.openannotation.org/ns/Constraint";
pub const OAC_CONSTRAINS: &str = "http://www.openannotation.org/ns/constrains";
pub const OAC_CONSTRAINED_BY: &str = "http://www.openannotation.org/ns/constrainedBy";

pub const OA_ANNOTATION: &str = "http://www.w3.org/ns/openannotation/core/Annotation";
pub const OA_HAS_BODY: &str = "http://www.w3.org/ns/openannotation/core/hasBody";
pub const OA_HAS_TARGET: &str = "http://www.w3.org/ns/openannotation/core/hasTarget";
pub const OA_SPECIFIC_RESOURCE: &str = "http://www.w3.org/ns/openannotation/core/SpecificResource";
pub const OA_HAS_SELECTOR: &str = "http://www.w3.org/ns/openannotation/core/hasSelector";
pub const OA_HAS_SOURCE: &str = "http://www.w3.org/ns/openannotation/core/hasSource";
pub const OAX_SVG_SELECTOR: &str = "http://www.w3.org/ns/openannotation/extensions/SvgSelector";

pub const CNT_CONTENT_AS_TEXT: &str = "http://www.w3.org/2008/content#ContentAsText";
pub const CNT_CHARS: &str = "http://www.w3.org/2008/content#chars";
pub const CNT_CHARACTER_ENCODING: &str = "http://www.w3.org/2008/content#characterEncoding";

/// Prefixes declared on the RDF/XML root element.
pub const NAMESPACES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("exif", "http://www.w3.org/2003/12/exif/ns#"),
    ("oac", "http://www.openannotation.org/ns/"),
    ("oa", "http://www.w3.org/ns/openannotation/core/"),
    ("oax", "http://www.w3.org/ns/openannotation/extensions/"),
    ("cnt", "http://www.w3.org/2008/content#"),
    ("cp", "http://www.catchplus.nl/annotation/"),
    ("sc", "http://dms.stanford.edu/ns/"),
];
