use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bookdex_core::{BookdexConfig, GoogleBooksClient, VolumeDetails};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "bookdex",
    about = "Google Books volume search from the terminal",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format (for AI agents and scripts).
    /// Also enabled by setting BOOKDEX_JSON=1.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search volumes by text.
    Search {
        query: String,
    },

    /// Show details for a volume by ID.
    Details {
        id: String,
    },

    /// Download the front-cover image for a volume.
    Cover {
        id: String,
        /// Output file path.
        #[arg(long, default_value = "cover.jpg")]
        out: PathBuf,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let start = Instant::now();
    let cli = Cli::parse();

    let json_output = cli.json || std::env::var("BOOKDEX_JSON").as_deref() == Ok("1");

    if let Err(err) = run(cli.command, json_output, start).await {
        if json_output {
            print_json(&serde_json::json!({
                "status": "error",
                "message": format!("{err:#}"),
                "meta": { "duration_ms": start.elapsed().as_millis() as u64 }
            }))?;
        } else {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Commands, json_output: bool, start: Instant) -> Result<()> {
    // Endpoint overrides, mainly for pointing at a mock server
    let mut config = BookdexConfig::default();
    if let Ok(url) = std::env::var("BOOKDEX_VOLUMES_URL") {
        config.volumes_url = url;
    }
    if let Ok(url) = std::env::var("BOOKDEX_COVERS_URL") {
        config.covers_url = url;
    }

    let mut client = GoogleBooksClient::with_config(config);

    match command {
        Commands::Search { query } => {
            let volumes = client.search(&query).await?;
            let dur = start.elapsed().as_millis() as u64;

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": volumes, "total": volumes.len(), "query": query },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if volumes.is_empty() {
                println!("No results for: {query}");
            } else {
                println!("Found {} results:", volumes.len());
                for (i, vol) in volumes.iter().enumerate() {
                    println!(
                        "{i:>3}  {id:<14}  {title:<40}  {authors}",
                        id = vol.id,
                        title = vol.title,
                        authors = vol.authors,
                    );
                }
            }
        }

        Commands::Details { id } => {
            let details = client.details(&id).await?;
            let dur = start.elapsed().as_millis() as u64;

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": details,
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                print_details(&details);
            }
        }

        Commands::Cover { id, out } => {
            let bytes = client.cover_image(&id).await?;
            std::fs::write(&out, &bytes)
                .with_context(|| format!("writing {}", out.display()))?;
            let dur = start.elapsed().as_millis() as u64;

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "path": out.display().to_string(), "bytes": bytes.len() },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("Wrote {} bytes to {}", bytes.len(), out.display());
            }
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn print_details(details: &VolumeDetails) {
    println!("{}", details.title);
    println!("Published: {}", format_date(details.published));
    println!(
        "ISBN: {}",
        details.isbn_10.as_deref().unwrap_or("Not available")
    );
    if let Some(authors) = &details.authors {
        println!("Authors: {authors}");
    }
    println!();
    println!("{}", details.description);
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => "Not available".to_string(),
    }
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
