//! # oncostage CLI Module
//!
//! ## Available Commands
//!
//! - `stage` - Clinical TNM stage group
//! - `stage-post` - Pathological (RCC) or SIOP (Wilms) stage
//! - `evaluate` - Full case assessment with recommendation
//! - `catalog` - List treatment options
//! - `references` - List guideline references
//! - `fingerprint` - Fingerprint of the active catalog
//! - `export-catalog` - Write the active catalog to a file

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use oncostage_core::{Histology, Locale, MarginStatus, OncoError, WilmsSubtype};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// oncostage - kidney cancer staging and guideline recommendations
///
/// Classifies AJCC TNM and SIOP stages for renal cell carcinoma and Wilms
/// tumor, and selects treatment options from a versioned guideline catalog.
#[derive(Parser, Debug)]
#[command(name = "oncostage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Display language (en, ar)
    #[arg(short = 'L', long, global = true)]
    pub locale: Option<Locale>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stage group from clinical TNM
    Stage {
        /// Primary tumor (TX, T0, T1a ... T4)
        #[arg(short = 't')]
        t: String,

        /// Regional nodes (NX, N0, N1)
        #[arg(short = 'n')]
        n: String,

        /// Distant metastasis (MX, M0, M1)
        #[arg(short = 'm')]
        m: String,
    },

    /// Stage from post-operative pTNM and pathology
    StagePost {
        /// Pathological primary tumor (pT1a ... pT4)
        #[arg(long)]
        pt: String,

        /// Pathological nodes (pNX, pN0, pN1)
        #[arg(long)]
        pn: String,

        /// Pathological metastasis; absent reads as pM0
        #[arg(long)]
        pm: Option<String>,

        /// Stage with the SIOP Wilms tumor rules instead of AJCC RCC
        #[arg(long)]
        wilms: bool,

        #[command(flatten)]
        pathology: PathologyArgs,
    },

    /// Assess a case file (JSON case record)
    Evaluate {
        /// Path to the case file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List treatment options in the active catalog
    Catalog,

    /// List guideline references
    References,

    /// Print the active catalog's fingerprint
    Fingerprint,

    /// Write the active catalog to a file
    ExportCatalog {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (snapshot, json)
        #[arg(short = 't', long, default_value = "snapshot")]
        format: String,
    },
}

/// Pathology report fields accepted by `stage-post`.
#[derive(clap::Args, Debug, Default)]
pub struct PathologyArgs {
    /// Histologic type (clear-cell, papillary, chromophobe, wilms-high, ...)
    #[arg(long)]
    pub histology: Option<Histology>,

    /// ISUP/WHO grade
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub grade: Option<u8>,

    /// Measured tumor size in millimetres
    #[arg(long)]
    pub size_mm: Option<u32>,

    /// Surgical margin (negative, positive, close)
    #[arg(long)]
    pub margin: Option<MarginStatus>,

    #[arg(long)]
    pub vascular_invasion: bool,

    #[arg(long)]
    pub lymphovascular_invasion: bool,

    #[arg(long)]
    pub sarcomatoid: bool,

    #[arg(long)]
    pub necrosis: bool,

    /// Tumor rupture (Wilms)
    #[arg(long)]
    pub ruptured: bool,

    /// Bilateral disease (Wilms)
    #[arg(long)]
    pub bilateral: bool,

    /// Detailed Wilms subtype (necrotic, epithelial, stromal, mixed,
    /// regressive, blastemal, anaplastic); sets the risk group when
    /// --histology does not
    #[arg(long)]
    pub wilms_type: Option<WilmsSubtype>,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), OncoError> {
    let config = Config::load(cli.config.as_deref())?;
    let ctx = Context::new(&config, cli.locale, cli.json_mode)?;

    match cli.command {
        Commands::Stage { t, n, m } => cmd_stage(&ctx, &t, &n, &m),
        Commands::StagePost {
            pt,
            pn,
            pm,
            wilms,
            pathology,
        } => cmd_stage_post(&ctx, &pt, &pn, pm.as_deref(), wilms, &pathology),
        Commands::Evaluate { file } => cmd_evaluate(&ctx, &file),
        Commands::Catalog => cmd_catalog(&ctx),
        Commands::References => cmd_references(&ctx),
        Commands::Fingerprint => cmd_fingerprint(&ctx),
        Commands::ExportCatalog { output, format } => {
            cmd_export_catalog(&ctx, &output, &format)
        }
    }
}
