//! Route Sitemap - command-line tool for documenting a web application's routes.
//!
//! Reads a registry snapshot and renders either an HTML sitemap or an OpenAPI
//! 3.0 document describing every endpoint, with route, query and body
//! parameters inferred from the handlers.
//!
//! # Usage
//!
//! ```bash
//! route-sitemap [OPTIONS] <SNAPSHOT>
//! ```
//!
//! # Examples
//!
//! Render the sitemap:
//! ```bash
//! route-sitemap routes.yaml -o sitemap.html
//! ```
//!
//! Generate the OpenAPI document under the `vinyl` tag:
//! ```bash
//! route-sitemap routes.yaml -f json -t vinyl -o openapi.json
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use route_sitemap::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Route Sitemap starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Done");

    Ok(())
}
