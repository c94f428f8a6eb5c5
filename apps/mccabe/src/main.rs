//! # mccabe
//!
//! Command-line front end for `mccabe-core`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/mccabe (THE BINARY)                 │
//! │                                                          │
//! │  ┌─────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │  │   CLI   │   │ config/input │   │ report (text/SVG)│   │
//! │  │ (clap)  │   │ (toml/serde) │   │                  │   │
//! │  └────┬────┘   └──────┬───────┘   └────────┬─────────┘   │
//! │       └───────────────┼────────────────────┘             │
//! │                       ▼                                  │
//! │               ┌───────────────┐                          │
//! │               │  mccabe-core  │                          │
//! │               │  (THE LOGIC)  │                          │
//! │               └───────────────┘                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Summary of the default n-hexane / cycloheptane design
//! mccabe
//!
//! # Another reflux ratio, diagram to a file
//! mccabe plot -r 3.5 -o column.svg
//!
//! # Own equilibrium data and configuration
//! mccabe init
//! mccabe -c mccabe.toml solve -e vle.csv --json-mode
//! ```

use clap::Parser;
use mccabe::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing: MCCABE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MCCABE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "mccabe=debug"
    } else {
        "mccabe=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
