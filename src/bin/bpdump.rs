//! bpdump - print every attribute and variable of a simulation output.

use anyhow::{Context, Result};
use bpcmp::data::NetcdfReader;
use bpcmp::dump::{collect_fields, render_dump};
use bpcmp::logging::init_file_logging;
use bpcmp::BpError;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bpdump")]
#[command(about = "bpdump utility for dumping bp output content", long_about = None)]
struct Args {
    /// Path to the bp output file
    bpout: PathBuf,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = &args.log {
        init_file_logging(log_path)?;
        tracing::info!("Starting bpdump");
    }

    println!("bpdump: bp dump utility");
    println!();

    if !args.bpout.exists() {
        return Err(BpError::file_not_found(&args.bpout).into());
    }

    let fields = {
        let reader = NetcdfReader::open(&args.bpout)
            .with_context(|| format!("Failed to open {}", args.bpout.display()))?;
        collect_fields(&reader)?
    };

    for line in render_dump(&fields) {
        println!("{}", line);
    }

    if args.log.is_some() {
        tracing::info!("bpdump exited");
    }

    Ok(())
}
