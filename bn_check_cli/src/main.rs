//! # check_bn_tests
//!
//! Verifies big-number test vector files. Diagnostics go to stderr; the exit
//! status says whether the run succeeded.

mod exit_codes;

use bn_check::config::build_info;
use bn_check::{check_file, CheckPreferences, ConsoleReporter, PipelineError, RunSummary};
use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "check_bn_tests", version, about = "Check big-number test vector files")]
struct Args {
    /// Test vector file to check
    path: PathBuf,

    /// Fail when any non-fatal diagnostic is reported
    #[arg(long)]
    strict: bool,

    /// Largest shift amount to evaluate
    #[arg(long, value_name = "N")]
    max_shift_bits: Option<u64>,

    /// Write a JSON run summary to FILE
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug with detailed diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Environment preferences with command-line overrides applied
    fn preferences(&self, base: CheckPreferences) -> CheckPreferences {
        let prefs = if self.strict {
            base.with_strict_exit_status(true)
        } else {
            base
        };
        match self.max_shift_bits {
            Some(bits) => prefs.with_max_shift_bits(bits),
            None => prefs,
        }
    }

    fn detailed_diagnostics(&self) -> bool {
        self.verbose >= 2
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn init_logging(level: LevelFilter) {
    // RUST_LOG, when set, replaces the verbosity default
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let status = if e.use_stderr() {
                exit_codes::USAGE
            } else {
                exit_codes::SUCCESS
            };
            std::process::exit(status);
        }
    };
    init_logging(args.log_level());
    info!("check_bn_tests {} ({})", env!("CARGO_PKG_VERSION"), build_info::source_info());

    let prefs = args.preferences(CheckPreferences::default());
    std::process::exit(run(&args, &prefs));
}

fn run(args: &Args, prefs: &CheckPreferences) -> i32 {
    let reporter = ConsoleReporter::new().with_details(args.detailed_diagnostics());

    let (summary, status) = match check_file(&args.path, prefs, &reporter) {
        Ok(summary) => {
            let status = if summary.passes(prefs.strict_exit_status) {
                exit_codes::SUCCESS
            } else {
                exit_codes::STRICT_DIAGNOSTICS
            };
            (Some(summary), status)
        }
        Err(PipelineError::File(_)) => (None, exit_codes::OPEN_FAILED),
        Err(PipelineError::Scan { summary, .. }) => (Some(*summary), exit_codes::SCAN_FAILED),
    };

    if let (Some(target), Some(summary)) = (&args.summary, &summary) {
        if let Err(message) = write_summary(target, summary) {
            error!("{}", message);
            return exit_codes::SUMMARY_FAILED;
        }
    }

    status
}

fn write_summary(target: &Path, summary: &RunSummary) -> Result<(), String> {
    let json = summary
        .to_json()
        .map_err(|e| format!("Failed to serialize summary: {}", e))?;
    std::fs::write(target, json)
        .map_err(|e| format!("Failed to write summary to {}: {}", target.display(), e))?;
    info!("Summary written to {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn base() -> CheckPreferences {
        CheckPreferences::from_lookup(|_| None)
    }

    fn args(extra: &[&str], path: &Path) -> Args {
        let mut argv = vec!["check_bn_tests"];
        argv.extend_from_slice(extra);
        let path = path.to_str().unwrap();
        argv.push(path);
        Args::try_parse_from(argv).unwrap()
    }

    fn vectors(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_requires_exactly_one_path() {
        assert!(Args::try_parse_from(["check_bn_tests"]).is_err());
        assert!(Args::try_parse_from(["check_bn_tests", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_flag_overrides() {
        let file = vectors("");
        let parsed = args(&["--strict", "--max-shift-bits", "64", "-vv"], file.path());
        let prefs = parsed.preferences(base());

        assert!(prefs.strict_exit_status);
        assert_eq!(prefs.max_shift_bits, 64);
        assert_eq!(parsed.log_level(), LevelFilter::Debug);
        assert!(parsed.detailed_diagnostics());
    }

    #[test]
    fn test_environment_strict_survives_without_flag() {
        let file = vectors("");
        let parsed = args(&[], file.path());
        let prefs = parsed.preferences(base().with_strict_exit_status(true));
        assert!(prefs.strict_exit_status);
        assert_eq!(parsed.log_level(), LevelFilter::Warn);
        assert!(!parsed.detailed_diagnostics());
    }

    #[test]
    fn test_exit_status() {
        let passing = vectors("Sum = 3\nA = 1\nB = 2\n");
        let mismatch = vectors("Sum = 4\nA = 1\nB = 2\n");
        let fatal = vectors("Sum = 3\nA = zz\n");

        let parsed = args(&[], passing.path());
        assert_eq!(run(&parsed, &parsed.preferences(base())), exit_codes::SUCCESS);

        // Non-fatal diagnostics only matter in strict mode
        let parsed = args(&[], mismatch.path());
        assert_eq!(run(&parsed, &parsed.preferences(base())), exit_codes::SUCCESS);
        let parsed = args(&["--strict"], mismatch.path());
        assert_eq!(
            run(&parsed, &parsed.preferences(base())),
            exit_codes::STRICT_DIAGNOSTICS
        );

        let parsed = args(&[], fatal.path());
        assert_eq!(run(&parsed, &parsed.preferences(base())), exit_codes::SCAN_FAILED);
    }

    #[test]
    fn test_missing_file_status() {
        let dir = tempdir().unwrap();
        let parsed = args(&[], &dir.path().join("missing.txt"));
        assert_eq!(run(&parsed, &parsed.preferences(base())), exit_codes::OPEN_FAILED);
    }

    #[test]
    fn test_summary_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("summary.json");
        let file = vectors("Sum = 4\nA = 1\nB = 2\n\nSquare = 4\nA = 2\n");

        let parsed = args(&["--summary", target.to_str().unwrap()], file.path());
        assert_eq!(run(&parsed, &parsed.preferences(base())), exit_codes::SUCCESS);

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("\"records_scanned\": 2"));
        assert!(written.contains("\"W102\": 1"));
    }

    #[test]
    fn test_unwritable_summary() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("no_such_dir").join("summary.json");
        let file = vectors("Sum = 3\nA = 1\nB = 2\n");

        let parsed = args(&["--summary", target.to_str().unwrap()], file.path());
        assert_eq!(
            run(&parsed, &parsed.preferences(base())),
            exit_codes::SUMMARY_FAILED
        );
    }
}
