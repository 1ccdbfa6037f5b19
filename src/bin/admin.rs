//! CLI administration tool for short-url.
//!
//! Manages the stored path → destination mappings directly in the store,
//! without going through the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # Create a shortened URL
//! cargo run --bin admin -- create -d https://golang.org -p go
//!
//! # Point it somewhere else
//! cargo run --bin admin -- update -d https://go.dev -p go
//!
//! # Show, list, delete
//! cargo run --bin admin -- get -p go
//! cargo run --bin admin -- list
//! cargo run --bin admin -- delete -p go --yes
//!
//! # Check the store connection
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `URL_SHORTENER_CONNECTION_STRING`: store connection string, used when
//!   `--connection-string` is not given (see `short_url::config` for the
//!   full resolution order)

use short_url::application::services::ShortUrlService;
use short_url::config::StoreSettings;
use short_url::domain::validation::{join_reasons, validate_destination, validate_path};
use short_url::error::AppError;
use short_url::infrastructure::persistence::KvShortUrlRepository;
use short_url::infrastructure::store::RedisStore;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Service = ShortUrlService<KvShortUrlRepository>;

/// Manage the shortened URLs.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Connection string of the store holding the URLs.
    /// Alternatively, set URL_SHORTENER_CONNECTION_STRING.
    #[arg(short, long, global = true)]
    connection_string: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a shortened URL
    Create(MappingArgs),

    /// Update a shortened URL
    Update(MappingArgs),

    /// Delete a shortened URL
    Delete {
        #[command(flatten)]
        path: PathArg,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Get a shortened URL
    Get(PathArg),

    /// List shortened URLs
    List,

    /// Check the store connection
    Check,
}

/// Path and destination of a mapping, validated while parsing.
#[derive(Args)]
struct MappingArgs {
    /// The URL that the shortened URL will forward to
    #[arg(short, long = "destination-url", value_parser = parse_destination)]
    destination: String,

    #[command(flatten)]
    path: PathArg,
}

#[derive(Args)]
struct PathArg {
    /// The path used for the shortened URL
    #[arg(short, long, value_parser = parse_path)]
    path: String,
}

fn parse_destination(value: &str) -> Result<String, String> {
    validate_destination(value)
        .map(|()| value.to_string())
        .map_err(|failures| join_reasons(&failures))
}

fn parse_path(value: &str) -> Result<String, String> {
    validate_path(value)
        .map(|()| value.to_string())
        .map_err(|failures| join_reasons(&failures))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = StoreSettings::resolve(cli.connection_string.as_deref())?;
    settings.validate()?;

    let store = RedisStore::connect(&settings.connection_string, settings.timeout())
        .await
        .context("Failed to connect to store")?;

    let repository = Arc::new(KvShortUrlRepository::new(Arc::new(store)));
    let service = ShortUrlService::new(repository);

    match cli.command {
        Commands::Create(args) => create(&service, args).await?,
        Commands::Update(args) => update(&service, args).await?,
        Commands::Delete { path, yes } => delete(&service, path.path, yes).await?,
        Commands::Get(args) => get(&service, args.path).await?,
        Commands::List => list(&service).await?,
        Commands::Check => check(&service).await?,
    }

    Ok(())
}

async fn create(service: &Service, args: MappingArgs) -> Result<(), AppError> {
    let short_url = service.create(&args.path.path, &args.destination).await?;

    println!("{}", "✓ Shortened URL created.".green().bold());
    print_mapping(&short_url.destination, &short_url.path);
    Ok(())
}

async fn update(service: &Service, args: MappingArgs) -> Result<(), AppError> {
    let short_url = service.update(&args.path.path, &args.destination).await?;

    println!("{}", "✓ Shortened URL updated.".green().bold());
    print_mapping(&short_url.destination, &short_url.path);
    Ok(())
}

/// Deletes a mapping, asking first when attached to a terminal.
async fn delete(service: &Service, path: String, skip_confirm: bool) -> Result<()> {
    if !skip_confirm && std::io::stdin().is_terminal() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete shortened URL '{}'?", path))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    if service.delete(&path).await? {
        println!("{}", "✓ Shortened URL deleted.".green().bold());
    } else {
        println!(
            "{}",
            format!("Nothing to delete: no shortened URL for path '{}'.", path).yellow()
        );
    }

    Ok(())
}

async fn get(service: &Service, path: String) -> Result<()> {
    match service.get(&path).await? {
        Some(short_url) => {
            print_mapping(&short_url.destination, &short_url.path);
            Ok(())
        }
        None => anyhow::bail!("Shortened URL for path '{}' not found.", path),
    }
}

/// Prints every mapping, sorted by path for stable output.
async fn list(service: &Service) -> Result<(), AppError> {
    let mut short_urls = service.list().await?;

    if short_urls.is_empty() {
        println!("{}", "No shortened URLs found".yellow());
        return Ok(());
    }

    short_urls.sort_by(|a, b| a.path.cmp(&b.path));

    for short_url in &short_urls {
        print_mapping(&short_url.destination, &short_url.path);
    }

    println!();
    println!(
        "Total: {}",
        short_urls.len().to_string().bright_white().bold()
    );
    Ok(())
}

async fn check(service: &Service) -> Result<()> {
    println!("{}", "Checking store connection...".bright_blue());

    if !service.health_check().await {
        anyhow::bail!("Store did not answer PING");
    }

    println!("{}", "✓ Store connection OK".green().bold());
    Ok(())
}

fn print_mapping(destination: &str, path: &str) {
    println!(
        "Destination URL: {}, Path: {}",
        destination.cyan(),
        path.bright_white().bold()
    );
}
