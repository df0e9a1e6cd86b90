//! boxtool - Inspect and rewrite Tesseract box files
//!
//! Reads box files, checks them against the page heights of the images
//! they describe, and writes them back out normalized, converted between
//! the legacy and current formats, or with combining marks merged.
//!
//! Page heights are passed on the command line (`--heights 3508,3508`),
//! one per page image, in page order.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use tessbox_core::text::{FindQuery, parse_find_query, to_hex};
use tessbox_core::{BoxDocument, BoxFormat, CodecOptions, CombineSymbols, LineEnding, TessBox};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output format for rewritten box files.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum FormatArg {
    /// Keep the format the file was read in (default)
    #[default]
    Keep,
    /// Tesseract 2.0x: no page field
    Legacy,
    /// Tesseract 3.0x: trailing page field
    Current,
}

impl FormatArg {
    fn resolve(self, doc: &BoxDocument) -> BoxFormat {
        match self {
            FormatArg::Keep => doc.format(),
            FormatArg::Legacy => BoxFormat::Legacy,
            FormatArg::Current => BoxFormat::Current,
        }
    }
}

/// Line terminator for rewritten box files.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LineEndingArg {
    /// Platform default (default)
    #[default]
    Native,
    Lf,
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Native => LineEnding::Native,
            LineEndingArg::Lf => LineEnding::Lf,
            LineEndingArg::Crlf => LineEnding::CrLf,
        }
    }
}

/// Inspect and rewrite Tesseract box files.
#[derive(Parser, Debug)]
#[command(name = "boxtool")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use debug logging level
    #[arg(short = 'd', long, global = true, action = ArgAction::SetTrue)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every command that reads a box file.
#[derive(Args, Debug)]
struct PageArgs {
    /// Pixel height of each page image, comma separated, in page order
    #[arg(short = 'H', long, value_delimiter = ',', required = true)]
    heights: Vec<i32>,
}

/// Options shared by every command that writes a box file.
#[derive(Args, Debug)]
struct WriteArgs {
    /// Path to write to, or "-" for stdout (default: rewrite in place)
    #[arg(short = 'o', long)]
    outfile: Option<String>,

    /// Box file format to write
    #[arg(short = 'f', long, value_enum, default_value = "keep")]
    format: FormatArg,

    /// Line terminator to write
    #[arg(long = "line-ending", value_enum, default_value = "native")]
    line_ending: LineEndingArg,
}

impl WriteArgs {
    fn options(&self) -> CodecOptions {
        CodecOptions::default().with_line_ending(self.line_ending.into())
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a box file and report its format and boxes per page
    Check {
        file: PathBuf,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// Parse and re-emit box files
    Normalize {
        /// One or more box files; several files are processed in parallel
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        pages: PageArgs,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Merge duplicate boxes and combining marks into their base characters
    Combine {
        file: PathBuf,
        #[command(flatten)]
        pages: PageArgs,
        /// Combining symbols as "<appending>;<prepending>" character classes
        #[arg(short = 's', long)]
        symbols: String,
        /// Leave zero-sized boxes as they are
        #[arg(long = "no-repair", action = ArgAction::SetTrue)]
        no_repair: bool,
        #[command(flatten)]
        write: WriteArgs,
    },
    /// Print the boxes as JSON rows
    Dump {
        file: PathBuf,
        #[command(flatten)]
        pages: PageArgs,
    },
    /// Find the first box by text or by file coordinates (x1 y1 x2 y2)
    Find {
        file: PathBuf,
        #[command(flatten)]
        pages: PageArgs,
        /// Page to search (0-indexed)
        #[arg(short = 'p', long, default_value = "0")]
        page: usize,
        /// Box text, or four integers x1 y1 x2 y2
        #[arg(required = true, num_args = 1..=4, allow_hyphen_values = true)]
        query: Vec<String>,
    },
}

/// One box as printed by `dump`.
#[derive(Debug, Serialize)]
struct BoxRow<'a> {
    page: usize,
    text: &'a str,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    codepoints: String,
}

impl<'a> From<&'a TessBox> for BoxRow<'a> {
    fn from(tessbox: &'a TessBox) -> Self {
        let rect = tessbox.rect();
        Self {
            page: tessbox.page(),
            text: tessbox.text(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            codepoints: to_hex(tessbox.text()),
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads and parses a box file.
fn load(path: &Path, heights: &[i32]) -> Result<BoxDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let doc = tessbox_core::parse(&content, heights)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    debug!(path = %path.display(), boxes = doc.box_count(), "loaded box file");
    Ok(doc)
}

/// Formats `doc` and writes it to `outfile`, "-" for stdout, or back to
/// `source` when no output is given.
fn save(doc: &BoxDocument, heights: &[i32], source: &Path, write: &WriteArgs) -> Result<()> {
    let target = write.format.resolve(doc);
    let text = tessbox_core::format_with(doc, heights, target, &write.options())?;

    match write.outfile.as_deref() {
        Some("-") => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("cannot write {path}"))?;
            info!(path, "wrote box file");
        }
        None => {
            std::fs::write(source, text)
                .with_context(|| format!("cannot write {}", source.display()))?;
            info!(path = %source.display(), "rewrote box file");
        }
    }
    Ok(())
}

fn format_name(format: BoxFormat) -> &'static str {
    match format {
        BoxFormat::Legacy => "legacy (5 fields)",
        BoxFormat::Current => "current (6 fields)",
    }
}

fn check(file: &Path, pages: &PageArgs) -> Result<()> {
    let doc = load(file, &pages.heights)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}: {}", file.display(), format_name(doc.format()))?;
    for page in doc.pages() {
        let degenerate = page.iter().filter(|b| b.rect().is_degenerate()).count();
        write!(stdout, "page {}: {} boxes", page.index(), page.len())?;
        if degenerate > 0 {
            write!(stdout, " ({degenerate} zero-sized)")?;
        }
        writeln!(stdout)?;
    }
    writeln!(stdout, "total: {} boxes", doc.box_count())?;
    Ok(())
}

fn normalize(files: &[PathBuf], pages: &PageArgs, write: &WriteArgs) -> Result<()> {
    if files.len() > 1 && write.outfile.is_some() {
        bail!("--outfile can only be used with a single input file");
    }

    // Each worker owns the document it parsed; nothing is shared.
    let failures: Vec<(PathBuf, anyhow::Error)> = files
        .par_iter()
        .filter_map(|path| {
            load(path, &pages.heights)
                .and_then(|doc| save(&doc, &pages.heights, path, write))
                .err()
                .map(|err| (path.clone(), err))
        })
        .collect();

    for (path, err) in &failures {
        eprintln!("Error processing {}: {err:#}", path.display());
    }
    if !failures.is_empty() {
        bail!("{} of {} files failed", failures.len(), files.len());
    }
    Ok(())
}

fn combine(
    file: &Path,
    pages: &PageArgs,
    symbols: &str,
    repair: bool,
    write: &WriteArgs,
) -> Result<()> {
    let symbols = CombineSymbols::parse(symbols)?;
    let mut doc = load(file, &pages.heights)?;
    if repair {
        let repaired = doc.repair_degenerate();
        debug!(repaired, "repaired zero-sized boxes");
    }
    let merged = doc.combine(&symbols);
    info!(merged, "combined boxes");
    save(&doc, &pages.heights, file, write)
}

fn dump(file: &Path, pages: &PageArgs) -> Result<()> {
    let doc = load(file, &pages.heights)?;
    let rows: Vec<BoxRow<'_>> = doc.boxes().map(BoxRow::from).collect();
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &rows)?;
    writeln!(stdout)?;
    Ok(())
}

fn find(file: &Path, pages: &PageArgs, page_index: usize, query: &[String]) -> Result<bool> {
    let doc = load(file, &pages.heights)?;
    let Some(page) = doc.page(page_index) else {
        bail!("page {page_index} does not exist ({} pages)", doc.page_count());
    };
    let page_height = pages.heights[page_index];

    let found = match parse_find_query(&query.join(" "))? {
        FindQuery::Text(text) => page.find_by_text(None, &text),
        FindQuery::Coords(coords) => page.find_by_file_rect(coords, page_height),
    };

    let mut stdout = io::stdout().lock();
    match found {
        Some(index) => {
            let tessbox = &page[index];
            let (x1, y1, x2, y2) = tessbox
                .rect()
                .to_file_coords(page_height)
                .context("box coordinates do not fit in file space")?;
            writeln!(
                stdout,
                "{index}: {} {x1} {y1} {x2} {y2} {page_index}",
                tessbox.text()
            )?;
            Ok(true)
        }
        None => {
            writeln!(stdout, "no matching box on page {page_index}")?;
            Ok(false)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Check { file, pages } => check(&file, &pages)?,
        Command::Normalize {
            files,
            pages,
            write,
        } => normalize(&files, &pages, &write)?,
        Command::Combine {
            file,
            pages,
            symbols,
            no_repair,
            write,
        } => combine(&file, &pages, &symbols, !no_repair, &write)?,
        Command::Dump { file, pages } => dump(&file, &pages)?,
        Command::Find {
            file,
            pages,
            page,
            query,
        } => {
            if !find(&file, &pages, page, &query)? {
                return Ok(ExitCode::from(1));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
