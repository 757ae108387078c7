//! ProofLint CLI
//!
//! Grammar and style checker for prose documents.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use prooflint_core::{CategoryId, CheckConfig, CheckError, DocumentAnalyzer};
use prooflint_llm::LlmEnhancer;

mod output;

/// ProofLint - Grammar and style checker for prose documents
#[derive(Parser)]
#[command(name = "plint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check documents
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Category to check; repeat for several (default: config file)
        #[arg(long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// Minimum confidence a finding needs to be reported
        #[arg(long)]
        threshold: Option<f32>,

        /// Maximum lines checked concurrently
        #[arg(long)]
        concurrency: Option<usize>,

        /// Enhance uncertain findings through the configured model
        #[arg(long)]
        llm: bool,
    },

    /// List the available check categories
    Categories,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_issues) => {
            if has_issues {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Check {
            files,
            format,
            categories,
            threshold,
            concurrency,
            llm,
        } => run_check(
            &cli,
            files,
            format,
            categories,
            *threshold,
            *concurrency,
            *llm,
        ),
        Commands::Categories => run_categories().map(|_| false),
        Commands::Init { force } => run_init(*force).map(|_| false),
    }
}

fn run_check(
    cli: &Cli,
    files: &[PathBuf],
    format: &str,
    categories: &[String],
    threshold: Option<f32>,
    concurrency: Option<usize>,
    llm: bool,
) -> Result<bool> {
    // Load configuration
    let mut config = if let Some(ref path) = cli.config {
        CheckConfig::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };

    // CLI overrides
    if !categories.is_empty() {
        config.categories = categories
            .iter()
            .map(|name| name.parse::<CategoryId>().map_err(|e| miette::miette!("{e}")))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(threshold) = threshold {
        config.confidence_threshold = threshold;
    }
    if let Some(concurrency) = concurrency {
        config.concurrency = concurrency;
    }
    if llm {
        config.llm.enabled = true;
    }

    let mut analyzer = DocumentAnalyzer::new(config).into_diagnostic()?;
    if analyzer.config().llm.enabled {
        let enhancer = LlmEnhancer::from_settings(&analyzer.config().llm).into_diagnostic()?;
        analyzer = analyzer.with_enhancer(Arc::new(enhancer));
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    let mut reports = Vec::new();
    let mut failures: Vec<(PathBuf, String)> = Vec::new();

    for path in files {
        let text = match read_document(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                failures.push((path.clone(), e.to_string()));
                continue;
            }
        };

        let filename = path.display().to_string();
        match runtime.block_on(analyzer.analyze(&filename, &text)) {
            Ok(report) => reports.push(report),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                failures.push((path.clone(), e.to_string()));
            }
        }
    }

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to check:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_issues = output::output_reports(&reports, format)?;

    Ok(has_issues || !failures.is_empty())
}

/// Reads a document, rejecting files that are not UTF-8 text.
fn read_document(path: &Path) -> std::result::Result<String, CheckError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|_| CheckError::parse(format!("{} is not valid UTF-8", path.display())))
}

fn find_config() -> Result<CheckConfig> {
    if let Some(path) = CheckConfig::discover(".") {
        info!("Using config: {}", path.display());
        return CheckConfig::from_file(&path).into_diagnostic();
    }

    // Return default config if no file found
    info!("No config file found, using defaults");
    Ok(CheckConfig::new())
}

fn run_categories() -> Result<()> {
    for category in CategoryId::ALL {
        let mut notes = Vec::new();
        if category.is_safe_baseline() {
            notes.push("baseline");
        }
        if category.is_complex() {
            notes.push("llm-assisted");
        }
        if notes.is_empty() {
            println!("{}", category.name());
        } else {
            println!("{:<20} ({})", category.name(), notes.join(", "));
        }
    }
    Ok(())
}

fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CheckConfig::CONFIG_FILES[0]);

    let default_config = r#"{
  // Categories to check. Empty means grammar, spelling, punctuation, agreement.
  "categories": [],
  "confidence_threshold": 0.8,
  "concurrency": 5,
  "llm": {
    "enabled": false,
    "model": "gpt-4o-mini"
  }
}
"#;

    loop {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);

        match options.open(&config_path) {
            Ok(mut file) => {
                use std::io::Write;
                file.write_all(default_config.as_bytes())
                    .into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "Config file already exists. Use --force to overwrite."
                    ));
                }

                // Remove and retry; the file may already be gone if another
                // process raced us, in which case the retry just succeeds.
                if std::fs::symlink_metadata(&config_path).is_ok() {
                    std::fs::remove_file(&config_path).into_diagnostic()?;
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}
