//! Resolve a saved GraphQL translation response, or print a chart link.
//!
//! Usage:
//!   pattoo-web-xlate [FILE]                       # Read response from FILE (or stdin)
//!   pattoo-web-xlate --link ID [LABEL] [SECONDS]  # Print a chart link
//!
//! Optional environment variables:
//! - PATTOO_WEB_LANGUAGE (defaults to en)
//! - PATTOO_WEB_SITE_PREFIX (defaults to /pattoo/web)
//! - PATTOO_WEB_DEFAULT_CHART_SECONDS (defaults to 86400)

use anyhow::{Context, Result};
use pattoo_web::{config, pair_xlate, uri};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pattoo_web=info".parse()?),
        )
        .init();

    let config = config::Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--link") {
        let id = args.get(1).context("Usage: pattoo-web-xlate --link ID [LABEL] [SECONDS]")?;
        let label = args.get(2).map(String::as_str);
        let secondsago = args.get(3).and_then(|v| uri::integerize_str(v));
        println!("{}", uri::chart_link(&config, id, label, secondsago));
        return Ok(());
    }

    let response = match args.first() {
        Some(path) => pair_xlate::load_response(Path::new(path))?,
        None => read_stdin()?,
    };

    let index = pair_xlate::resolve(&response, config.language())
        .context("Failed to resolve translation response")?;
    info!(
        "Resolved {} translation groups for language '{}'",
        index.len(),
        config.language()
    );

    println!("{}", serde_json::to_string_pretty(&index)?);
    Ok(())
}

fn read_stdin() -> Result<Value> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read GraphQL response from stdin")?;
    serde_json::from_str(&raw).context("Failed to parse GraphQL response from stdin")
}
