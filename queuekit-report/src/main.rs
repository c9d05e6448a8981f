//! # Queueing Scenario Report
//!
//! Evaluates one stationary queueing scenario and prints its steady-state
//! metrics. With no arguments it reports on the built-in repair-crew
//! scenario: five air-conditioning units looked after by one repair crew.
//!
//! ```sh
//! cargo run -p queuekit-report
//! cargo run -p queuekit-report -- --scenario queuekit-report/scenarios/bank_tellers.toml
//! RUST_LOG=debug cargo run -p queuekit-report -- --format json
//! ```

mod args;
mod error;
mod report;
mod scenario;

use std::{fs, process::ExitCode};

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use args::{Args, Format, USAGE};
use error::ReportError;
use report::Report;
use scenario::Scenario;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, source = ?std::error::Error::source(&err), "report failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), ReportError> {
    let args = Args::parse()?;

    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let scenario = match &args.scenario {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ReportError::Read {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "loaded scenario");
            Scenario::from_toml(&text)?
        }
        None => {
            info!("no scenario given, using the built-in repair crew");
            Scenario::repair_crew()
        }
    };
    debug!(?scenario, "evaluating");

    let report = Report::evaluate(&scenario)?;
    info!(kind = report.kind, "model evaluated");

    match args.format {
        Format::Text => print!("{report}"),
        Format::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
