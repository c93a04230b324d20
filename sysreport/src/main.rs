//! System Report
//!
//! Collects host facts and the installed package list, then writes them to a
//! two-sheet xlsx workbook.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sysreport::{collect_snapshot, Config, SysinfoHost, SystemRunner};

#[derive(Parser)]
#[command(name = "sysreport")]
#[command(about = "Snapshot this host's configuration into a spreadsheet report")]
struct Cli {
    /// Config file (default: search standard locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output workbook, overrides the configured path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log collection details at debug level
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    sysreport::init::init_tracing("sysreport", sysreport::init::default_level(cli.verbose))?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.paths.output = output;
    }

    let host = SysinfoHost::new();
    let runner = SystemRunner::new(config.packages.max_output_bytes);

    let snapshot = collect_snapshot(&config, &host, &runner).await;
    let path = snapshot.write(&config.paths.output)?;

    println!("System information saved to {}", path.display());
    Ok(())
}
