use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::core::index::{Conversion, InputMode};
use crate::derive::{ModelDeriver, OffsetDeriver};
use crate::export::ExportFormat;
use crate::parser::{Ingested, LineStripReader, NavisReader, RecordSource};
use crate::transform::TransformSettings;

/// Everything one conversion run needs, as collected by the CLI.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub formats: Vec<ExportFormat>,
    pub x_offset: Option<i32>,
    pub y_offset: Option<i32>,
    pub canvas_width: Option<i32>,
    pub canvas_height: Option<i32>,
    pub scale: Option<f64>,
    pub line_strips: bool,
}

impl ConversionConfig {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            output: None,
            formats: vec![ExportFormat::RdfXml],
            x_offset: None,
            y_offset: None,
            canvas_width: None,
            canvas_height: None,
            scale: None,
            line_strips: false,
        }
    }

    pub fn mode(&self) -> InputMode {
        if self.line_strips {
            InputMode::LineStrips
        } else {
            InputMode::Navis
        }
    }

    /// The canvas override only applies when both dimensions are given.
    pub fn settings(&self) -> TransformSettings {
        TransformSettings {
            x_offset: self.x_offset,
            y_offset: self.y_offset,
            scale: self.scale,
            canvas: self.canvas_width.zip(self.canvas_height),
        }
    }
}

pub fn ingest(config: &ConversionConfig) -> Result<Ingested> {
    let source: Box<dyn RecordSource> = match config.mode() {
        InputMode::Navis => Box::new(NavisReader::new()),
        InputMode::LineStrips => Box::new(LineStripReader::new()),
    };
    let ingested = source
        .read_path(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    Ok(ingested)
}

/// Derives the page model from ingested records and applies the spatial
/// transform. A canvas read from a line-strip file wins over one given in
/// `settings`. Text-mode runs without a page id fail here, before any output
/// is written.
pub fn convert(ingested: Ingested, mode: InputMode, settings: TransformSettings) -> Result<Conversion> {
    let Ingested {
        records,
        mut context,
    } = ingested;
    let mut model = OffsetDeriver::new().derive(records)?;

    let settings = TransformSettings {
        canvas: context.canvas.or(settings.canvas),
        ..settings
    };
    context.canvas = settings.canvas;
    if context.page_id.is_none() {
        context.page_id = model.page_id().map(str::to_string);
    }
    if mode == InputMode::Navis && context.page_id.is_none() {
        anyhow::bail!("input records carry no page id");
    }

    settings.apply(&mut model);
    info!(
        "converted page {:?}: {} lines, bounds {:?}",
        context.page_id,
        model.index().lines().len(),
        model.page().region
    );
    Ok(Conversion {
        model,
        context,
        mode,
    })
}

pub fn build_conversion(config: &ConversionConfig) -> Result<Conversion> {
    let ingested = ingest(config)?;
    convert(ingested, config.mode(), config.settings())
        .with_context(|| format!("Failed to convert {}", config.input.display()))
}

pub fn export_conversion(conversion: &Conversion, config: &ConversionConfig) -> Result<()> {
    for format in &config.formats {
        let destination = format.destination(config.output.as_deref());
        format
            .exporter(destination.clone())
            .export(conversion)
            .with_context(|| format!("Failed to export {format:?} to {destination:?}"))?;
    }
    Ok(())
}
