use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use nyu_courses::crawl;
use nyu_courses::export::{self, Saved};
use nyu_courses::fetch::HttpFetcher;
use nyu_courses::filter;
use nyu_courses::links;
use nyu_courses::parser::BulletinSchema;
use nyu_courses::settings::{OutputFormat, Settings};
use nyu_courses::DescriptionPolicy;

#[derive(Parser)]
#[command(name = "nyu_courses", about = "NYU course bulletin scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every subject page and save the catalog
    Scrape {
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Output file (default: nyu_courses.json / nyu_courses.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        index_url: Option<String>,
        /// Whether course blocks without a description are kept
        #[arg(long, value_enum)]
        description: Option<DescriptionPolicy>,
    },
    /// Strip descriptions from a saved JSON catalog
    Filter {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Scrape to JSON, then filter the result
    Run {
        #[arg(long, value_enum)]
        description: Option<DescriptionPolicy>,
    },
    /// List subject pages found on the index
    Links {
        #[arg(long)]
        index_url: Option<String>,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;

    let result = match cli.command {
        Commands::Scrape {
            format,
            output,
            index_url,
            description,
        } => {
            if let Some(f) = format {
                settings.format = f;
            }
            if output.is_some() {
                settings.output = output;
            }
            if let Some(u) = index_url {
                settings.index_url = u;
            }
            if let Some(d) = description {
                settings.description = d;
            }
            scrape(&settings).map(|_| ())
        }
        Commands::Filter { input, output } => {
            let input = input.unwrap_or_else(|| settings.catalog_json_path());
            let output = output.unwrap_or_else(|| settings.filtered_output.clone());
            run_filter(&input, &output)
        }
        Commands::Run { description } => {
            settings.format = OutputFormat::Json;
            if let Some(d) = description {
                settings.description = d;
            }
            match scrape(&settings)? {
                Some(path) => run_filter(&path, &settings.filtered_output),
                None => {
                    println!("Nothing to filter.");
                    Ok(())
                }
            }
        }
        Commands::Links { index_url } => {
            if let Some(u) = index_url {
                settings.index_url = u;
            }
            let fetcher = HttpFetcher::new(&settings.user_agent)?;
            let (index, base) = (settings.index_url()?, settings.base_url()?);
            let found = links::collect_links(&fetcher, &BulletinSchema, &index, &base)
                .context("Error fetching the main URL")?;
            for url in &found {
                println!("{}", url);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Crawl and save. Returns the written path, or `None` when nothing was scraped.
fn scrape(settings: &Settings) -> Result<Option<PathBuf>> {
    let fetcher = HttpFetcher::new(&settings.user_agent)?;
    let (index, base) = (settings.index_url()?, settings.base_url()?);

    let report = crawl::crawl(&fetcher, &BulletinSchema, &index, &base, settings.description);
    if report.index_error.is_none() {
        println!("{}", report.summary());
    }

    let output = settings.output_path();
    match export::save_catalog(&report.catalog, &output, settings.format)? {
        Saved::Written { path, count } => {
            println!("Scraped {} courses and saved to {}", count, path.display());
            Ok(Some(path))
        }
        Saved::Empty => {
            println!("No courses were scraped to save.");
            Ok(None)
        }
    }
}

fn run_filter(input: &Path, output: &Path) -> Result<()> {
    let summary = filter::filter_file(input, output)?;
    println!("Successfully loaded {} courses from '{}'.", summary.loaded, input.display());
    println!(
        "Successfully created '{}' with {} courses.",
        output.display(),
        summary.kept
    );
    Ok(())
}
