pub mod graph;
pub mod json_export;
pub mod rdf_xml;
pub mod text_export;
pub mod vocab;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::index::Conversion;

pub use json_export::JsonExporter;
pub use rdf_xml::RdfXmlExporter;
pub use text_export::TextExporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    RdfXml,
    Json,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::RdfXml => "rdf",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }

    /// Where this format is written given the run's output path. RDF/XML
    /// takes the path as given; other formats swap in their own extension.
    pub fn destination(&self, output: Option<&Path>) -> Destination {
        match (output, self) {
            (None, _) => Destination::Stdout,
            (Some(path), ExportFormat::RdfXml) => Destination::File(path.to_path_buf()),
            (Some(path), _) => Destination::File(path.with_extension(self.extension())),
        }
    }

    pub fn exporter(&self, destination: Destination) -> Box<dyn Exporter> {
        match self {
            ExportFormat::RdfXml => Box::new(RdfXmlExporter::new(destination)),
            ExportFormat::Json => Box::new(JsonExporter::new(destination)),
            ExportFormat::Text => Box::new(TextExporter::new(destination)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            Destination::Stdout => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
            Destination::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

pub trait Exporter {
    fn export(&self, conversion: &Conversion) -> Result<()>;
}
