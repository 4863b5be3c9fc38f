//! Bookstore catalog server entry point.
//!
//! # Responsibility
//! - Parse command-line arguments and load layered configuration.
//! - Hand the result to `bookstore_server::run`.

use anyhow::Context;
use bookstore_server::config::load_config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bookstore-server", version, about = "Bookstore catalog HTTP service")]
struct Args {
    /// Optional TOML configuration file; `BOOKSTORE__*` env vars still apply.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("failed to load configuration")?;
    bookstore_server::run(config).await
}
