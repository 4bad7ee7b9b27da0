//! pages2sheet - Rebuild spreadsheet grids from extracted page dumps
//!
//! A command line tool that reads the positioned words and table detections
//! of each page (as produced by the extraction collaborator), reconstructs
//! the reading-order layout and writes the resulting workbook model as JSON
//! or as tab-separated text.

use clap::{ArgAction, Parser, ValueEnum};
use nova_core::converter::{Sheet, Workbook};
use nova_core::document::Document;
use nova_core::error::{LayoutError, Result};
use nova_core::high_level::{ConvertOptions, convert_document};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// Output type for the converted workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum OutputType {
    /// Workbook model as JSON (default)
    #[default]
    Json,
    /// One tab-separated block per sheet
    Tsv,
}

/// Rebuild spreadsheet grids from extracted page dumps.
#[derive(Parser, Debug)]
#[command(name = "pages2sheet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to JSON page dumps
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// JSON file with conversion options; flags below override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    // === Page selection ===
    /// A space or comma separated list of page numbers to convert (1-indexed)
    #[arg(long = "page-numbers")]
    page_numbers: Option<String>,

    /// The maximum number of pages to convert (0 = no limit)
    #[arg(short = 'm', long)]
    maxpages: Option<usize>,

    /// Number of worker threads
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    // === Layout options ===
    /// Vertical tolerance when clustering words into lines
    #[arg(long = "line-tolerance")]
    line_tolerance: Option<f64>,

    /// Largest gap across which word fragments are merged
    #[arg(long = "fragment-gap")]
    fragment_gap: Option<f64>,

    /// IoU above which a table candidate counts as a duplicate
    #[arg(long = "dedup-iou")]
    dedup_iou: Option<f64>,

    /// Gap between words of a line that leaves an empty column
    #[arg(long = "column-gap")]
    column_gap: Option<f64>,

    /// Write numeric-looking cells as numbers
    #[arg(short = 'N', long = "numbers", action = ArgAction::SetTrue)]
    numbers: bool,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output_type", value_enum, default_value = "json")]
    output_type: OutputType,

    /// Pretty-print JSON output
    #[arg(short = 'p', long, action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Parse 1-indexed page numbers into zero-indexed ones.
///
/// Every entry must be a positive integer; a bad entry rejects the list
/// rather than silently widening the selection to every page.
fn parse_page_numbers(list: &str) -> Result<Vec<usize>> {
    let nums = list
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n - 1),
            _ => Err(LayoutError::InvalidOptions(format!(
                "invalid page number '{s}' (pages start at 1)"
            ))),
        })
        .collect::<Result<Vec<usize>>>()?;
    if nums.is_empty() {
        return Err(LayoutError::InvalidOptions(
            "--page-numbers needs at least one page".to_string(),
        ));
    }
    Ok(nums)
}

/// Build ConvertOptions from the config file and command line arguments,
/// then validate the merged result.
fn build_options(args: &Args) -> Result<ConvertOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let data = std::fs::read(path).map_err(|e| {
                LayoutError::InvalidOptions(format!("config {}: {}", path.display(), e))
            })?;
            serde_json::from_slice::<ConvertOptions>(&data).map_err(|e| {
                LayoutError::InvalidOptions(format!("config {}: {}", path.display(), e))
            })?
        }
        None => ConvertOptions::default(),
    };

    if let Some(list) = &args.page_numbers {
        options.page_numbers = Some(parse_page_numbers(list)?);
    }
    if let Some(maxpages) = args.maxpages {
        options.maxpages = maxpages;
    }
    if args.threads.is_some() {
        options.threads = args.threads;
    }
    if let Some(v) = args.line_tolerance {
        options.layout.line_tolerance = v;
    }
    if let Some(v) = args.fragment_gap {
        options.layout.fragment_gap = v;
    }
    if let Some(v) = args.dedup_iou {
        options.tables.dedup_iou = v;
    }
    if let Some(v) = args.column_gap {
        options.grid.column_gap = v;
    }
    if args.numbers {
        options.grid.coerce_numbers = true;
    }
    options.validate()?;
    Ok(options)
}

/// Render a sheet as tab-separated rows, keeping empty rows and columns.
fn sheet_to_tsv(sheet: &Sheet) -> String {
    let max_row = sheet.max_row();
    let max_col = sheet.max_column();
    let mut out = format!("# {}\n", sheet.name);
    for row in 1..=max_row {
        let cells: Vec<String> = (1..=max_col)
            .map(|col| sheet.text(row, col).unwrap_or_default())
            .collect();
        out.push_str(cells.join("\t").trim_end_matches('\t'));
        out.push('\n');
    }
    out
}

fn write_workbook<W: Write>(writer: &mut W, workbook: &Workbook, args: &Args) -> Result<()> {
    match args.output_type {
        OutputType::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(workbook)
            } else {
                serde_json::to_string(workbook)
            }
            .map_err(|e| LayoutError::Io(io::Error::other(e)))?;
            writer.write_all(json.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        OutputType::Tsv => {
            for sheet in &workbook.sheets {
                writer.write_all(sheet_to_tsv(sheet).as_bytes())?;
            }
        }
    }
    Ok(())
}

/// Process a single page dump.
fn process_file<W: Write>(
    path: &PathBuf,
    writer: &mut W,
    args: &Args,
    options: &ConvertOptions,
) -> Result<()> {
    let doc = Document::open(path)?;
    debug!(path = %path.display(), pages = doc.page_count(), "converting");
    let workbook = convert_document(&doc, options)?;
    write_workbook(writer, &workbook, args)
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    let options = match build_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }

        if let Err(e) = process_file(path, &mut output, &args, &options) {
            eprintln!("Error processing {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    output.flush()?;

    Ok(())
}
