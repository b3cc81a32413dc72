pub mod core;
pub mod derive;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod transform;

pub use crate::core::error::{Error, Result};
pub use crate::core::index::{Conversion, InputMode, PageModel};
pub use crate::core::model::{AnnotationRecord, Field, PageContext, TextSegment};
