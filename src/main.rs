use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;

use navis_oa::export::ExportFormat;
use navis_oa::pipeline::{build_conversion, export_conversion, ConversionConfig};

#[derive(Parser, Debug)]
#[command(name = "navis-oa")]
#[command(version, about = "Convert navis OCR transcriptions into Open Annotation RDF", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a transcription file to annotations
    Convert {
        /// Input file: navis line-tagged text, or line-strip XML with --line-strips
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format(s) to generate
        #[arg(short, long, value_enum, default_values_t = vec![Format::RdfXml])]
        format: Vec<Format>,

        /// Pixel offset added to x coordinates
        #[arg(long, allow_negative_numbers = true)]
        x_offset: Option<i32>,

        /// Pixel offset added to y coordinates
        #[arg(long, allow_negative_numbers = true)]
        y_offset: Option<i32>,

        /// Canvas width replacing the derived page width
        #[arg(long)]
        x_canvas: Option<i32>,

        /// Canvas height replacing the derived page height
        #[arg(long)]
        y_canvas: Option<i32>,

        /// Divide all coordinates by this factor
        #[arg(long)]
        scale_factor: Option<f64>,

        /// Read line-strip XML instead of navis records
        #[arg(long)]
        line_strips: bool,

        /// Suppress progress messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show records, line order and page bounds of a transcription file
    Info {
        /// Input file path
        input: PathBuf,

        /// Read line-strip XML instead of navis records
        #[arg(long)]
        line_strips: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Format {
    RdfXml,
    Json,
    Text,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::RdfXml => ExportFormat::RdfXml,
            Format::Json => ExportFormat::Json,
            Format::Text => ExportFormat::Text,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            x_offset,
            y_offset,
            x_canvas,
            y_canvas,
            scale_factor,
            line_strips,
            quiet,
        } => {
            let config = ConversionConfig {
                input,
                output,
                formats: format.into_iter().map(ExportFormat::from).collect(),
                x_offset,
                y_offset,
                canvas_width: x_canvas,
                canvas_height: y_canvas,
                scale: scale_factor,
                line_strips,
            };
            convert(config, quiet)
        }
        Commands::Info { input, line_strips } => {
            let mut config = ConversionConfig::new(input);
            config.line_strips = line_strips;
            show_info(config)
        }
    }
}

fn validate_input(config: &ConversionConfig) -> Result<()> {
    if !config.input.exists() {
        anyhow::bail!("Input file does not exist: {}", config.input.display());
    }
    if !config.input.is_file() {
        anyhow::bail!("Input is not a file: {}", config.input.display());
    }
    Ok(())
}

fn convert(config: ConversionConfig, quiet: bool) -> Result<()> {
    validate_input(&config)?;

    if !quiet {
        eprintln!("[*] Processing: {}", config.input.display());
        if let Some(output) = &config.output {
            eprintln!("[*] Output: {}", output.display());
        }
    }

    let conversion = build_conversion(&config)?;

    if !quiet {
        eprintln!(
            "[+] Derived {} lines, exporting {} format(s)...",
            conversion.model.index().lines().len(),
            config.formats.len()
        );
    }

    export_conversion(&conversion, &config).with_context(|| match &config.output {
        Some(output) => format!("Failed to export to: {}", output.display()),
        None => "Failed to export to stdout".to_string(),
    })?;

    if !quiet {
        eprintln!("[✓] Done");
    }

    Ok(())
}

fn show_info(config: ConversionConfig) -> Result<()> {
    validate_input(&config)?;

    let conversion = build_conversion(&config)?;
    let model = &conversion.model;
    let page = &model.page().region;

    println!("Transcription Information");
    println!("=========================");
    println!("File: {}", config.input.display());
    println!("Page: {}", conversion.page_id().unwrap_or("-"));
    println!("Records: {}", model.index().records().len());
    println!("Lines: {}", model.index().lines().len());
    for entry in model.entries() {
        let text = entry.segment.map(|s| s.text_str()).unwrap_or_default();
        println!(
            "  {} ({} word zones) {}",
            entry.id,
            entry.words.len(),
            text
        );
    }
    match page.width {
        Some(width) => println!("Page bounds: {}x{}", width, page.height),
        None => println!("Page bounds: ?x{}", page.height),
    }
    println!("Page text: {} chars", model.page().text_range);

    Ok(())
}
