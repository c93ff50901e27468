//! docintel CLI - PDF outline extraction and section ranking tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docintel::render::{outline_to_markdown, to_json};
use docintel::{
    AnalysisOptions, Collection, DocIntel, DocumentOutcome, JsonFormat, OutlineResult,
    SectionAnalysis,
};

#[derive(Parser)]
#[command(name = "docintel")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections for a persona", long_about = None)]
struct Cli {
    /// Process documents one at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Keep going when a page cannot be read
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and heading outline
    Outline {
        /// Input PDF, span dump, or directory of documents
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Output directory (stdout if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Heading classifier model
        #[arg(long, value_name = "FILE", env = "DOCINTEL_MODEL")]
        model: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Detect sections and rank them for a persona
    #[command(alias = "rank")]
    Sections {
        /// Input PDF, span dump, or directory of documents
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Output directory (stdout if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Persona role, e.g. "PhD Researcher"
        #[arg(long, default_value = "")]
        persona: String,

        /// Job to be done, e.g. "Summarize findings"
        #[arg(long, default_value = "")]
        task: String,

        /// Number of top-ranked sections to keep
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Analyze a document collection configuration
    Collection {
        /// Collection configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of top-ranked sections to report
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = AnalysisOptions::new();
    if cli.sequential {
        options = options.sequential();
    }
    if cli.lenient {
        options = options.lenient();
    }

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            model,
            format,
            compact,
        } => {
            let mut app = DocIntel::new().with_options(options);
            if let Some(model) = model {
                app = app.with_model(model);
            }
            cmd_outline(&app, &input, output.as_deref(), format, json_format(compact))
        }
        Commands::Sections {
            input,
            output,
            persona,
            task,
            top,
            compact,
        } => {
            let app = DocIntel::new().with_options(options).with_persona(persona, task);
            cmd_sections(&app, &input, output.as_deref(), top, json_format(compact))
        }
        Commands::Collection {
            config,
            output,
            top,
            compact,
        } => {
            if let Some(top) = top {
                options = options.with_max_ranked(top);
            }
            cmd_collection(&config, output.as_deref(), &options, json_format(compact))
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

/// Expand a directory into the documents it holds, sorted by name.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    ext.eq_ignore_ascii_case("pdf") || ext.eq_ignore_ascii_case("json")
                })
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(format!("No documents found in {}", input.display()).into());
    }
    Ok(paths)
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

/// Write one rendered document to `output/<stem>.<ext>` or stdout.
fn emit(
    rendered: &str,
    source: &Path,
    output: Option<&Path>,
    extension: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let stem = source.file_stem().unwrap_or_default().to_string_lossy();
            let path = dir.join(format!("{}.{}", stem, extension));
            fs::write(&path, rendered)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Report failed documents; an error only if nothing succeeded.
fn report<T>(outcomes: &[DocumentOutcome<T>]) -> Result<(), Box<dyn std::error::Error>> {
    let failed: Vec<_> = outcomes.iter().filter_map(|o| o.failure()).collect();
    for failure in &failed {
        eprintln!(
            "{} {}: {}",
            "Failed".yellow().bold(),
            failure.filename,
            failure.error
        );
    }

    if !outcomes.is_empty() && failed.len() == outcomes.len() {
        return Err(format!("all {} documents failed", failed.len()).into());
    }
    if outcomes.len() > 1 {
        println!(
            "\n{} {} processed, {} failed",
            "Done!".green().bold(),
            outcomes.len() - failed.len(),
            failed.len()
        );
    }
    Ok(())
}

fn cmd_outline(
    app: &DocIntel,
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    json: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = collect_inputs(input)?;
    log::info!("Using {} classifier", app.classifier_name());

    let pb = progress_bar(paths.len(), "Extracting outlines...");
    let outcomes = app.outline_batch_with_progress(&paths, |_| pb.inc(1));
    pb.finish_and_clear();

    for outcome in &outcomes {
        let Ok(outline) = &outcome.result else {
            continue;
        };
        let (rendered, extension) = render_outline(outline, format, json)?;
        emit(&rendered, &outcome.path, output, extension)?;
    }

    report(&outcomes)
}

fn render_outline(
    outline: &OutlineResult,
    format: OutputFormat,
    json: JsonFormat,
) -> Result<(String, &'static str), Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Json => (to_json(outline, json)?, "json"),
        OutputFormat::Markdown => (outline_to_markdown(outline), "md"),
    })
}

fn cmd_sections(
    app: &DocIntel,
    input: &Path,
    output: Option<&Path>,
    top: Option<usize>,
    json: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = collect_inputs(input)?;

    let pb = progress_bar(paths.len(), "Analyzing sections...");
    let mut outcomes: Vec<DocumentOutcome<SectionAnalysis>> =
        app.analyze_batch_with_progress(&paths, |_| pb.inc(1));
    pb.finish_and_clear();

    for outcome in &mut outcomes {
        let Ok(analysis) = &mut outcome.result else {
            continue;
        };
        if let Some(top) = top {
            analysis.ranked_sections.truncate(top);
        }
        let rendered = to_json(analysis, json)?;
        emit(&rendered, &outcome.path, output, "json")?;
    }

    report(&outcomes)
}

fn cmd_collection(
    config: &Path,
    output: Option<&Path>,
    options: &AnalysisOptions,
    json: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let collection = Collection::load(config)?;

    let pb = progress_bar(collection.config().documents.len(), "Analyzing documents...");
    let result = collection.run_with_progress(options, |_| pb.inc(1));
    pb.finish_and_clear();

    for failure in &result.failures {
        eprintln!(
            "{} {}: {}",
            "Failed".yellow().bold(),
            failure.filename,
            failure.error
        );
    }

    let rendered = to_json(&result, json)?;
    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docintel".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven section ranking");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docintel".dimmed());
    println!("License: MIT");
}
