//! bpcmp - compare two simulation outputs field by field.

use anyhow::{Context, Result};
use bpcmp::compare::compare_files;
use bpcmp::config::CompareOptions;
use bpcmp::data::NetcdfReader;
use bpcmp::logging::init_file_logging;
use bpcmp::report::{stdout_supports_color, Reporter};
use bpcmp::BpError;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "bpcmp")]
#[command(about = "bpcmp utility for comparing bp output", long_about = None)]
struct Args {
    /// bp output number 1
    output1: PathBuf,

    /// bp output number 2
    output2: PathBuf,

    /// Relative tolerance (default is zero)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    rtol: f64,

    /// Absolute tolerance (default is zero)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    atol: f64,

    /// Verbose output: (0,1,2) to report (nothing, errors only, everything)
    #[arg(
        short,
        long,
        default_value_t = 0,
        num_args = 0..=1,
        default_missing_value = "1",
        allow_negative_numbers = true
    )]
    verbose: i64,

    /// List of attributes to ignore
    #[arg(long = "ignore-atts", num_args = 1.., value_name = "NAME")]
    ignore_atts: Vec<String>,

    /// List of variables to ignore
    #[arg(long = "ignore-vars", num_args = 1.., value_name = "NAME")]
    ignore_vars: Vec<String>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("ERROR: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the outputs are identical.
fn run(args: Args) -> Result<bool> {
    if let Some(log_path) = &args.log {
        init_file_logging(log_path)?;
        tracing::info!("Starting bpcmp");
    }

    let reporter = Reporter::new(Default::default(), stdout_supports_color());
    println!("{}", reporter.banner("bpcmp: bp output comparison utility"));
    println!();

    // Validate everything before any output is opened
    for path in [&args.output1, &args.output2] {
        if !path.exists() {
            return Err(BpError::file_not_found(path).into());
        }
    }
    let options = CompareOptions::from_raw(
        args.rtol,
        args.atol,
        args.verbose,
        args.ignore_atts,
        args.ignore_vars,
    )?;
    let reporter = Reporter::new(options.verbosity, reporter.color);

    let first = args.output1.display().to_string();
    let second = args.output2.display().to_string();
    for line in reporter.inputs(&first, &second, &options) {
        println!("{}", line);
    }
    println!();

    let comparison = {
        let reader1 = NetcdfReader::open(&args.output1)
            .with_context(|| format!("Failed to open {}", first))?;
        let reader2 = NetcdfReader::open(&args.output2)
            .with_context(|| format!("Failed to open {}", second))?;
        compare_files(&reader1, &reader2, &options)?
    };

    for line in reporter.field_lines(&comparison) {
        println!("{}", line);
    }
    println!("{}", reporter.summary(&comparison));

    tracing::info!("bpcmp exited with {} differences", comparison.differences);
    Ok(comparison.is_identical())
}
