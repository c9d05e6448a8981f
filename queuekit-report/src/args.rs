//! Command-line argument parsing.

use std::path::PathBuf;

use crate::error::ReportError;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    /// Scenario file to evaluate. The built-in repair-crew scenario is used if absent.
    pub scenario: Option<PathBuf>,
    pub format: Format,
    pub help: bool,
}

impl Args {
    /// Parse arguments from an iterator whose first item is the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Args`] for unknown flags, missing values, or an
    /// unsupported format.
    pub fn parse_from<I, S>(args: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut parsed = Self::default();

        let mut rest = args.iter().skip(1);
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "-s" | "--scenario" => {
                    let path = rest
                        .next()
                        .ok_or_else(|| ReportError::Args(format!("{arg} requires a path")))?;
                    parsed.scenario = Some(PathBuf::from(path));
                }
                "-f" | "--format" => {
                    parsed.format = match rest.next().map(String::as_str) {
                        Some("text") => Format::Text,
                        Some("json") => Format::Json,
                        Some(other) => {
                            return Err(ReportError::Args(format!("unknown format `{other}`")));
                        }
                        None => return Err(ReportError::Args(format!("{arg} requires a value"))),
                    };
                }
                "-h" | "--help" => parsed.help = true,
                unknown => return Err(ReportError::Args(format!("unknown argument `{unknown}`"))),
            }
        }

        Ok(parsed)
    }

    /// Parse arguments from the environment.
    ///
    /// # Errors
    ///
    /// See [`Args::parse_from`].
    pub fn parse() -> Result<Self, ReportError> {
        Self::parse_from(std::env::args())
    }
}

pub const USAGE: &str = "\
Usage: queuekit-report [--scenario <path>] [--format text|json]

Evaluates a steady-state queueing scenario and prints its metrics.
Without --scenario the built-in repair-crew scenario is used.

Options:
  -s, --scenario <path>   TOML scenario file
  -f, --format <format>   Output format: text (default) or json
  -h, --help              Print this message

Set RUST_LOG to control diagnostic output on stderr.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_defaults() {
        let args = Args::parse_from(["queuekit-report"]).unwrap();
        assert_eq!(args, Args::default());
    }

    #[test]
    fn scenario_and_format() {
        let args =
            Args::parse_from(["queuekit-report", "--scenario", "shop.toml", "-f", "json"]).unwrap();

        assert_eq!(args.scenario, Some(PathBuf::from("shop.toml")));
        assert_eq!(args.format, Format::Json);
        assert!(!args.help);
    }

    #[test]
    fn help_flag() {
        assert!(Args::parse_from(["queuekit-report", "-h"]).unwrap().help);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Args::parse_from(["queuekit-report", "--scenario"]),
            Err(ReportError::Args(_))
        ));
        assert!(matches!(
            Args::parse_from(["queuekit-report", "--format", "yaml"]),
            Err(ReportError::Args(_))
        ));
        assert!(matches!(
            Args::parse_from(["queuekit-report", "--verbose"]),
            Err(ReportError::Args(_))
        ));
    }
}
