//! Threadscrape command-line interface
//!
//! Scrapes conversational content from supported platforms and manages
//! exported result files.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use threadscrape::config::{load_config, ScraperConfig};
use threadscrape::{JsonStorage, Orchestrator, ScraperRegistry};
use tracing_subscriber::EnvFilter;

/// Threadscrape: a scraper for conversational web content
#[derive(Parser, Debug)]
#[command(name = "threadscrape")]
#[command(version)]
#[command(about = "Scrape conversations and opinions from known platforms", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to a TOML configuration file (defaults apply otherwise)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a single URL
    ScrapeUrl {
        /// URL to scrape
        url: String,

        /// Export results to this file (relative to the data directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Scrape multiple URLs from a file (one URL per line)
    ScrapeUrls {
        /// File containing URLs, one per line
        input: PathBuf,

        /// Export results to this file (relative to the data directory)
        #[arg(short, long)]
        output: String,
    },

    /// Scrape multiple URLs from a specific platform
    ScrapePlatform {
        /// Platform name (reddit, stackoverflow, medium, devto)
        platform: String,

        /// One or more URLs to scrape
        #[arg(required = true)]
        urls: Vec<String>,

        /// Export results to this file (relative to the data directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List all supported platforms
    ListPlatforms,

    /// Re-export a results file to a different format
    Export {
        /// Results JSON file from a previous scrape
        input: PathBuf,

        /// Path for the re-exported file
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Show the summary of a results file
    Summary {
        /// Results JSON file from a previous scrape
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Json,
    Csv,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("threadscrape=info,warn"),
            1 => EnvFilter::new("threadscrape=debug,info"),
            2 => EnvFilter::new("threadscrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => ScraperConfig::default(),
    };

    match cli.command {
        Command::ScrapeUrl { url, output } => handle_scrape_url(&config, &url, output).await,
        Command::ScrapeUrls { input, output } => {
            handle_scrape_urls(&config, &input, &output).await
        }
        Command::ScrapePlatform {
            platform,
            urls,
            output,
        } => handle_scrape_platform(&config, &platform, &urls, output).await,
        Command::ListPlatforms => handle_list_platforms(&config),
        Command::Export {
            input,
            output,
            format,
        } => handle_export(&input, &output, format),
        Command::Summary { input } => handle_summary(&input),
    }
}

/// Builds an orchestrator with the built-in platforms and JSON storage
fn build_orchestrator(config: &ScraperConfig) -> anyhow::Result<Orchestrator> {
    let registry = ScraperRegistry::with_default_platforms(config)?;
    let store = Box::new(JsonStorage::new(&config.data_dir)?);
    Ok(Orchestrator::new(registry, store))
}

async fn handle_scrape_url(
    config: &ScraperConfig,
    url: &str,
    output: Option<String>,
) -> anyhow::Result<()> {
    println!("Scraping: {}", url);

    let mut orchestrator = build_orchestrator(config)?;
    let outcome = orchestrator.scrape_one(url).await?;

    if outcome.success {
        println!("✓ Success! Extracted {} messages", outcome.messages_count);
    } else {
        println!(
            "✗ Failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    if let Some(name) = output {
        let path = orchestrator.export(&name)?;
        println!("Results saved to: {}", path.display());
    }

    Ok(())
}

async fn handle_scrape_urls(
    config: &ScraperConfig,
    input: &Path,
    output: &str,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)
        .map_err(|e| anyhow::anyhow!("Failed to read input file {}: {}", input.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if urls.is_empty() {
        anyhow::bail!("No URLs found in input file: {}", input.display());
    }

    println!("Scraping {} URLs from {}", urls.len(), input.display());

    let mut orchestrator = build_orchestrator(config)?;
    orchestrator.scrape_many(&urls).await?;

    print_run_summary(&orchestrator);

    let path = orchestrator.export(output)?;
    println!("Results saved to: {}", path.display());

    Ok(())
}

async fn handle_scrape_platform(
    config: &ScraperConfig,
    platform: &str,
    urls: &[String],
    output: Option<String>,
) -> anyhow::Result<()> {
    println!("Scraping {} URLs from {}", urls.len(), platform);

    let mut orchestrator = build_orchestrator(config)?;
    orchestrator.scrape_platform(platform, urls).await?;

    print_run_summary(&orchestrator);

    if let Some(name) = output {
        let path = orchestrator.export(&name)?;
        println!("Results saved to: {}", path.display());
    }

    Ok(())
}

fn handle_list_platforms(config: &ScraperConfig) -> anyhow::Result<()> {
    let registry = ScraperRegistry::with_default_platforms(config)?;

    println!("Supported platforms:");
    println!();
    for platform in registry.supported_platforms() {
        println!("  - {}", platform);
    }
    println!();
    println!("Usage examples:");
    println!("  threadscrape scrape-url https://reddit.com/r/rust");
    println!("  threadscrape scrape-platform reddit URL1 URL2");

    Ok(())
}

fn handle_export(input: &Path, output: &Path, format: ExportFormat) -> anyhow::Result<()> {
    let record = threadscrape::output::read_record(input)?;

    match format {
        ExportFormat::Json => {
            threadscrape::output::write_json(&record, output)?;
            println!("✓ Exported to JSON: {}", output.display());
        }
        ExportFormat::Csv => {
            threadscrape::output::write_csv(&record, output)?;
            println!("✓ Exported to CSV: {}", output.display());
        }
    }

    Ok(())
}

fn handle_summary(input: &Path) -> anyhow::Result<()> {
    let record = threadscrape::output::read_record(input)?;
    threadscrape::output::print_summary(&record);
    Ok(())
}

fn print_run_summary(orchestrator: &Orchestrator) {
    let summary = orchestrator.summary();

    println!();
    println!(
        "✓ Completed: {}/{} successful",
        summary.successful, summary.total_urls
    );
    println!("  Total messages extracted: {}", summary.total_messages);
    println!("  Success rate: {:.1}%", summary.success_rate);
}
