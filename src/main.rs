use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{error, info};

use net_url::config::ParserConfig;
use net_url::utils::logger::{init_logger, init_stderr_logger};
use net_url::{Url, UrlContext};

/// Parse URLs into their components and print their canonical form
#[derive(Debug, Parser)]
#[command(name = "net_url", version, about)]
struct Cli {
    /// URLs to parse
    urls: Vec<String>,

    /// Read URLs from a file, one per line (blank lines and `#` comments are skipped)
    #[arg(long, value_name = "FILE")]
    batch: Option<PathBuf>,

    /// Parse relative to this URL
    #[arg(long, value_name = "URL", conflicts_with_all = ["scheme", "host", "port"])]
    previous: Option<String>,

    /// Scheme inherited by URLs without one
    #[arg(long)]
    scheme: Option<String>,

    /// Host inherited by URLs without one
    #[arg(long)]
    host: Option<String>,

    /// Port inherited by URLs without one
    #[arg(long)]
    port: Option<String>,

    /// Configuration file providing the default scheme, host and port
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print one JSON object per URL
    #[arg(long)]
    json: bool,

    /// Write logs to a timestamped file in this directory instead of stderr
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every URL parsed.
fn run(cli: Cli) -> Result<bool> {
    match &cli.log_dir {
        Some(dir) => init_logger(dir)?,
        None => init_stderr_logger()?,
    }

    let context = resolve_context(&cli)?;

    let mut urls = cli.urls.clone();
    if let Some(path) = &cli.batch {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file {}", path.display()))?;
        urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }
    if urls.is_empty() {
        bail!("No URLs given; pass them as arguments or with --batch <FILE>");
    }

    info!("Processing {} URLs", urls.len());
    let start = Instant::now();
    let mut failed = 0;

    for raw in &urls {
        match Url::parse_in_context(raw, &context) {
            Ok(url) if cli.json => println!("{}", render_json(raw, &url)),
            Ok(url) => print_url(raw, &url),
            Err(e) => {
                failed += 1;
                error!("Failed to parse '{}': {}", raw, e);
                if cli.json {
                    println!("{}", json!({ "input": raw, "error": e.to_string() }));
                } else {
                    println!("{}\n  error: {}\n", raw, e);
                }
            }
        }
    }

    if urls.len() > 1 && !cli.json {
        println!("Processed: {} URLs", urls.len());
        println!("Successful: {} URLs", urls.len() - failed);
        println!("Failed: {} URLs", failed);
        println!("Processing time: {:?}", start.elapsed());
    }

    Ok(failed == 0)
}

/// Picks the previous context: `--previous`, then explicit flags, then the config file.
fn resolve_context(cli: &Cli) -> Result<UrlContext> {
    if let Some(previous) = &cli.previous {
        let previous = Url::parse(previous)
            .with_context(|| format!("Invalid --previous URL '{}'", previous))?;
        return Ok(previous.context());
    }

    let config = ParserConfig::load(cli.config.as_deref())?;
    let base = config.context();
    let port = cli.port.as_deref();
    let mut context = UrlContext::from_strs(
        Some(cli.scheme.as_deref().unwrap_or(&base.scheme)),
        Some(cli.host.as_deref().unwrap_or(&base.host)),
        port,
    )?;
    if port.is_none() {
        context.port = base.port;
    }
    Ok(context)
}

fn print_url(raw: &str, url: &Url) {
    println!("{}", raw);
    println!("  scheme:    {}", url.scheme());
    println!("  host:      {}", url.host());
    println!("  port:      {}", url.port());
    println!("  path:      {}", url.path());
    println!("  fragment:  {}", url.fragment());
    for (i, (key, value)) in url.parameters().iter().enumerate() {
        println!("  param {}:   {} = {}", i + 1, key, value);
    }
    println!("  canonical: {}", url.compose_url());
    println!();
}

fn render_json(raw: &str, url: &Url) -> serde_json::Value {
    json!({
        "input": raw,
        "url": url,
        "canonical": url.compose_url(),
    })
}
