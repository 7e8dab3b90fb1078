//! bidsprep-pp - BIDS post-processor
//!
//! Fixes up a dataset after DICOM-to-BIDS conversion: renames field-map
//! files, keeps `*_scans.tsv` in sync, and fills in field-map sidecar
//! metadata. Run with `--dry-run` first to preview.

use anyhow::{Context, Result};
use bidsprep_common::config::ConfigResolver;
use bidsprep_common::{SessionId, SubjectId};
use bidsprep_pp::{elevate, run, RunOptions, Steps};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for bidsprep-pp
#[derive(Parser, Debug)]
#[command(name = "bidsprep-pp")]
#[command(about = "Post-process BIDS fmap files, scans.tsv and fieldmap JSON metadata")]
#[command(version)]
struct Args {
    /// Base directory containing BIDS subject folders (e.g. .../bidsdata)
    #[arg(short, long, env = "BIDSPREP_BASE_DIR")]
    base_dir: PathBuf,

    /// Subject IDs (e.g. 01 02 or sub-01 sub-02)
    #[arg(short, long, num_args = 1.., required = true)]
    subjects: Vec<SubjectId>,

    /// Session IDs (e.g. 001 mrt1 or ses-001 ses-mrt1); all ses-* when omitted
    #[arg(short = 'e', long, num_args = 1..)]
    sessions: Option<Vec<SessionId>>,

    /// Value for B0FieldIdentifier in fieldmap JSON [default: from config, else b0map_fmap0]
    #[arg(long, value_name = "LABEL")]
    b0_identifier: Option<String>,

    /// Print what would change, but do not modify files
    #[arg(long)]
    dry_run: bool,

    /// Run the file renaming step (combinable; none selected runs all)
    #[arg(long)]
    rename_files: bool,

    /// Run the scans.tsv update step (combinable; none selected runs all)
    #[arg(long)]
    update_scans: bool,

    /// Run the fieldmap JSON update step (combinable; none selected runs all)
    #[arg(long)]
    update_json: bool,

    /// Re-run this command with elevated privileges (e.g. files created by Docker as root)
    #[arg(long)]
    sudo: bool,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new(args.config.clone())
        .resolve()
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(false)
        .init();

    info!(
        "Starting bidsprep-pp v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if args.sudo {
        let code = elevate::reexec_elevated(&config.elevation_command)
            .context("Failed to re-run with elevated privileges")?;
        if let Some(code) = code {
            std::process::exit(code);
        }
    }

    let options = RunOptions {
        base_dir: args.base_dir,
        subjects: args.subjects,
        sessions: args.sessions,
        dry_run: args.dry_run,
    };
    let steps = Steps::from_flags(args.rename_files, args.update_scans, args.update_json);
    let b0_identifier = args.b0_identifier.unwrap_or(config.b0_identifier);

    if options.dry_run {
        info!("Dry run: no files will be modified");
    }
    info!("Base directory: {}", options.base_dir.display());

    run(&options, steps, &b0_identifier).context("Post-processing aborted")?;

    info!("Post-processing complete");
    Ok(())
}
