//! pdf-outline CLI - PDF title and heading extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::BatchRunner;
use pdf_outline::render::validate_outline_json;
use pdf_outline::{BatchReport, FileStatus, HeadingLevel, Outliner, Verdict};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Extract the title and H1-H3 headings of PDFs as JSON", long_about = None)]
struct Cli {
    /// Input PDF file (single-file mode)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    dirs: DirArgs,

    #[command(flatten)]
    tuning: TuningArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct DirArgs {
    /// Directory of PDFs for batch mode
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "PDF_OUTLINE_INPUT_DIR",
        default_value = "/app/input"
    )]
    input_dir: PathBuf,

    /// Directory receiving one JSON file per PDF
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "PDF_OUTLINE_OUTPUT_DIR",
        default_value = "/app/output"
    )]
    output_dir: PathBuf,
}

#[derive(Args)]
struct TuningArgs {
    /// Output single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Never let a heading sit more than one level below the previous one
    #[arg(long, global = true)]
    repair_hierarchy: bool,

    /// Word limit for uppercase and title-case headings
    #[arg(long, global = true, value_name = "N")]
    max_heading_words: Option<usize>,

    /// Keep lines repeated at the top or bottom of many pages
    #[arg(long, global = true)]
    no_footer_filter: bool,
}

impl TuningArgs {
    fn outliner(&self) -> Outliner {
        let mut outliner = Outliner::new();
        if self.compact {
            outliner = outliner.compact();
        }
        if self.repair_hierarchy {
            outliner = outliner.repair_hierarchy();
        }
        if let Some(n) = self.max_heading_words {
            outliner = outliner.with_max_heading_words(n);
        }
        if self.no_footer_filter {
            outliner = outliner.without_footer_filter();
        }
        outliner
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in the input directory (default when no input is given)
    Batch,

    /// Extract the outline of one PDF
    File {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show how every line of a PDF was classified
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Check JSON files against the outline schema
    Validate {
        /// JSON files to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch) => cmd_batch(&cli.dirs, &cli.tuning),
        Some(Commands::File { input, output }) => {
            cmd_file(&input, output.as_deref(), &cli.tuning)
        }
        Some(Commands::Inspect { input }) => cmd_inspect(&input, &cli.tuning),
        Some(Commands::Validate { files }) => cmd_validate(&files),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) => cmd_file(&input, cli.output.as_deref(), &cli.tuning),
            None => cmd_batch(&cli.dirs, &cli.tuning),
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(dirs: &DirArgs, tuning: &TuningArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runner =
        BatchRunner::new(&dirs.input_dir, &dirs.output_dir).with_outliner(tuning.outliner());
    let files = runner.prepare()?;
    log::debug!(
        "Batch {} -> {}",
        runner.input_dir().display(),
        runner.output_dir().display()
    );

    if files.is_empty() {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            runner.input_dir().display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut report = BatchReport::default();
    for input in &files {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.to_string());
        report.outcomes.push(runner.process_file(input));
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files written to {}",
        "Finished:".green().bold(),
        report.succeeded(),
        report.total(),
        runner.output_dir().display()
    );
    for failure in report.failures() {
        println!("  {} {}", "✗".red(), failure);
    }

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_file() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    let is_pdf = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(format!("Not a .pdf file: {}", input.display()).into());
    }

    let result = tuning.outliner().extract(input)?;

    if let Some(path) = output {
        result.write_to(path)?;
        println!(
            "{} {} ({} headings)",
            "Saved to".green(),
            path.display(),
            result.document.outline.len()
        );
    } else {
        println!("{}", result.to_json()?);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, tuning: &TuningArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = tuning.outliner().extract(input)?;
    let extraction = &result.extraction;

    println!("{}", "Document".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {} ({})",
        "Engine".bold(),
        extraction.engine_name,
        extraction.engine
    );
    if !extraction.info.version.is_empty() {
        println!("{}: PDF {}", "Format".bold(), extraction.info.version);
    }
    println!("{}: {}", "Pages".bold(), extraction.page_count());
    match result.body_font_size() {
        Some(size) => println!("{}: {:.1} pt", "Body font".bold(), size),
        None => println!("{}: {}", "Body font".bold(), "unknown".dimmed()),
    }
    println!(
        "{}: {:?} ({})",
        "Title".bold(),
        result.document.title,
        result.title.source
    );
    let doc = &result.document;
    println!(
        "{}: {} (H1 {}, H2 {}, H3 {})",
        "Headings".bold(),
        doc.outline.len(),
        doc.count_level(HeadingLevel::H1),
        doc.count_level(HeadingLevel::H2),
        doc.count_level(HeadingLevel::H3)
    );

    println!();
    println!("{}", "Lines".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for item in result.line_verdicts() {
        let line = item.line;
        let size = line
            .font_size
            .map(|s| format!("{:>5.1}", s))
            .unwrap_or_else(|| "    -".to_string());
        let label = match &item.verdict {
            Verdict::Heading(c) => match c.level {
                HeadingLevel::H1 => item.verdict.to_string().green().bold(),
                HeadingLevel::H2 => item.verdict.to_string().green(),
                HeadingLevel::H3 => item.verdict.to_string().cyan(),
            },
            Verdict::Body => item.verdict.to_string().normal(),
            Verdict::Noise(_) => item.verdict.to_string().dimmed(),
        };
        println!(
            "p{:<3} {:>3} {} {:<24} {}",
            line.page,
            line.index,
            size.dimmed(),
            label,
            line.text.trim()
        );
    }

    Ok(())
}

fn cmd_validate(files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let mut failed = 0;
    for path in files {
        let outcome = fs::read_to_string(path)
            .map_err(pdf_outline::Error::from)
            .and_then(|json| validate_outline_json(&json));
        match outcome {
            Ok(doc) => println!(
                "{} {} ({} headings)",
                "✓".green(),
                path.display(),
                doc.outline.len()
            ),
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), path.display(), e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} files failed validation", failed, files.len()).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading extraction tool");
    println!();
    println!("License: MIT");
}
