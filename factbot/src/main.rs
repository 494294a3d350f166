//! Scheduled fact bot entry point.
//!
//! One run = load the catalog, deterministically select today's fact,
//! compose the post, publish it. No state survives between runs; two
//! processes started in the same date and slot select the same fact.
//!
//! ```bash
//! factbot --dry-run                 # select and print, skip the network
//! factbot --at 2025-07-16T09:00:00Z # rehearse a specific instant
//! ```

mod config;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use factbot_core::{compose, load_catalog, select};
use xpost::XClient;

struct Args {
    catalog: PathBuf,
    at: Option<DateTime<Utc>>,
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Tracing to stderr; stdout carries only the composed post
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let raw: Vec<String> = std::env::args().collect();
    if raw.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let args = match parse_args(&raw[1..]) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    let catalog = match load_catalog(&args.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(path = %args.catalog.display(), error = %e, "catalog load failed");
            std::process::exit(1);
        }
    };
    tracing::info!(facts = catalog.len(), "catalog loaded");

    let now = args.at.unwrap_or_else(Utc::now);
    let schedule = config::schedule();

    let selected = match select(&catalog, now, &schedule) {
        Ok(selected) => selected,
        Err(e) => {
            tracing::error!(error = %e, "selection failed");
            std::process::exit(1);
        }
    };
    tracing::info!(
        category = %selected.fact.category,
        anniversary = selected.anniversary_hit,
        "fact selected"
    );

    let post = compose(&selected, &config::style());
    println!("{post}");

    if args.dry_run {
        tracing::info!("dry run, skipping publish");
        return Ok(());
    }

    let client = match XClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "credentials not configured");
            std::process::exit(1);
        }
    };

    match client.post(&post).await {
        Ok(receipt) => {
            tracing::info!(id = %receipt.id, "published");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "publish failed");
            std::process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        catalog: PathBuf::from("facts.csv"),
        at: None,
        dry_run: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--catalog" => {
                let value = iter.next().ok_or("--catalog requires a path")?;
                parsed.catalog = PathBuf::from(value);
            }
            "--at" => {
                let value = iter.next().ok_or("--at requires an RFC 3339 timestamp")?;
                let instant = DateTime::parse_from_rfc3339(value)
                    .map_err(|e| format!("invalid --at timestamp `{value}`: {e}"))?;
                parsed.at = Some(instant.with_timezone(&Utc));
            }
            "--dry-run" => parsed.dry_run = true,
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    Ok(parsed)
}

fn print_help() {
    println!("factbot - deterministic scheduled fact bot for X");
    println!();
    println!("USAGE:");
    println!("  factbot [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help           Show this help message");
    println!("  --catalog <PATH>     Catalog CSV file (default: facts.csv)");
    println!("  --at <TIMESTAMP>     Select as if run at this RFC 3339 instant");
    println!("  --dry-run            Print the composed post without publishing");
    println!();
    println!("CREDENTIALS (environment or .env):");
    println!("  X_API_KEY, X_API_SECRET, X_ACCESS_TOKEN, X_ACCESS_TOKEN_SECRET");
    println!();
    println!("EXAMPLES:");
    println!("  factbot --dry-run");
    println!("  factbot --catalog data/facts.csv --at 2025-07-16T09:00:00Z --dry-run");
}
