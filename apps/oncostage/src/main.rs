//! # oncostage
//!
//! Kidney cancer staging and guideline recommendations from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Clinical stage group
//! oncostage stage -t T1b -n N0 -m M0
//!
//! # Post-operative stage with pathology
//! oncostage stage-post --pt pT3a --pn pN0 --histology clear-cell --grade 4
//!
//! # Full assessment of a case record, Arabic text, JSON output
//! oncostage --locale ar --json-mode evaluate -f case.json
//! ```

use clap::Parser;
use oncostage::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // ONCOSTAGE_LOG_FORMAT=json enables machine-parseable logs.
    let log_format = std::env::var("ONCOSTAGE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "oncostage=debug"
    } else {
        "oncostage=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Startup banner, on stderr so stdout stays clean for results.
fn print_banner() {
    eprintln!(
        "oncostage v{} - AJCC/SIOP staging and guideline recommendations\n",
        env!("CARGO_PKG_VERSION")
    );
}
