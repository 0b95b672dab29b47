//! # txcfg
//!
//! Validates tenant provisioning documents. Each path may be a `.json` file
//! or a directory of them. Exits 0 when every document is valid, 1 otherwise.

use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use txcfg_validator::config::runtime::{FileProcessorPreferences, LogLevel, LoggingPreferences};
use txcfg_validator::logging::{self, codes};
use txcfg_validator::{
    batch, discover_documents, log_error, log_info, write_report, BatchConfig, DiscoveryOptions,
    DocumentKind, ReportOptions, RunStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Certificate provisioning tenants
    Certbot,
    /// Report delivery tenants
    Reports,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Certbot => DocumentKind::Certbot,
            KindArg::Reports => DocumentKind::Reports,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LevelArg> for LogLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Error => LogLevel::Error,
            LevelArg::Warn => LogLevel::Warning,
            LevelArg::Info => LogLevel::Info,
            LevelArg::Debug => LogLevel::Debug,
        }
    }
}

/// Validate tenant configuration documents
#[derive(Parser, Debug)]
#[command(name = "txcfg", version)]
#[command(about = "Validate tenant provisioning configuration documents")]
struct Cli {
    /// JSON documents or directories containing them
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Document schema to validate against
    #[arg(long, value_enum, default_value_t = KindArg::Certbot)]
    kind: KindArg,

    /// Descend into subdirectories
    #[arg(long, short = 'r')]
    recursive: bool,

    /// Maximum worker threads (default: available cores)
    #[arg(long, short = 't', value_name = "N")]
    threads: Option<usize>,

    /// Check documents one at a time
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,

    /// Stop after the first invalid document
    #[arg(long)]
    fail_fast: bool,

    /// Only print failures
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Emit log events to stderr as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Emit log events at or above this level to stderr
    #[arg(long, value_enum, value_name = "LEVEL")]
    log_level: Option<LevelArg>,

    /// Print a per-document diagnostic summary to stderr
    #[arg(long)]
    summary: bool,
}

impl Cli {
    fn logging_preferences(&self) -> LoggingPreferences {
        let mut prefs = LoggingPreferences::default();
        if self.json_logs {
            prefs.use_structured_logging = true;
            prefs.enable_console_logging = true;
        }
        if let Some(level) = self.log_level {
            prefs.min_log_level = level.into();
            prefs.enable_console_logging = true;
        }
        prefs
    }

    fn batch_config(&self) -> BatchConfig {
        let mut config = BatchConfig {
            kind: self.kind.into(),
            fail_fast: self.fail_fast,
            file_preferences: FileProcessorPreferences::default(),
            ..BatchConfig::default()
        };
        if let Some(threads) = self.threads {
            config.max_threads = threads.max(1);
        }
        if self.sequential {
            config = config.sequential();
        }
        config
    }
}

fn run(cli: &Cli) -> Result<RunStatus, Box<dyn std::error::Error>> {
    logging::config::init_runtime_preferences(cli.logging_preferences())?;
    logging::init_global_logging()?;

    log_info!("txcfg starting",
        "kind" => DocumentKind::from(cli.kind),
        "inputs" => cli.paths.len());

    let options = DiscoveryOptions {
        recursive: cli.recursive,
    };
    let documents = discover_documents(&cli.paths, &options)?;

    let results = batch::process_documents(&documents, &cli.batch_config())?;
    log_info!("Batch finished", "summary" => results.summary());

    let status = write_report(
        &results,
        &ReportOptions { quiet: cli.quiet },
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;

    if cli.summary {
        eprint!("{}", logging::cargo_style_summary());
    }

    Ok(status)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli) {
        Ok(RunStatus::AllValid) => ExitCode::SUCCESS,
        Ok(RunStatus::Failed) => ExitCode::FAILURE,
        Err(error) => {
            log_error!(codes::system::INTERNAL_ERROR, "Run aborted", "error" => &error);
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["txcfg", "configs/"]).unwrap();
        assert_eq!(cli.kind, KindArg::Certbot);
        assert!(!cli.recursive);
        assert_eq!(cli.paths, vec![PathBuf::from("configs/")]);
        assert_eq!(cli.batch_config().kind, DocumentKind::Certbot);
    }

    #[test]
    fn test_paths_are_required() {
        assert!(Cli::try_parse_from(["txcfg"]).is_err());
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "txcfg", "--kind", "reports", "--recursive", "--fail-fast", "--threads", "3",
            "a.json", "b/",
        ])
        .unwrap();

        let config = cli.batch_config();
        assert_eq!(config.kind, DocumentKind::Reports);
        assert_eq!(config.max_threads, 3);
        assert!(config.fail_fast);
        assert_eq!(cli.paths.len(), 2);
    }

    #[test]
    fn test_sequential_forces_single_thread() {
        let cli = Cli::try_parse_from(["txcfg", "--sequential", "a.json"]).unwrap();
        assert_eq!(cli.batch_config().max_threads, 1);
        assert!(Cli::try_parse_from(["txcfg", "--sequential", "--threads", "2", "a.json"]).is_err());
    }

    #[test]
    fn test_log_flags_enable_console_output() {
        let cli = Cli::try_parse_from(["txcfg", "--json-logs", "--log-level", "debug", "a.json"])
            .unwrap();
        let prefs = cli.logging_preferences();
        assert!(prefs.use_structured_logging);
        assert!(prefs.enable_console_logging);
        assert_eq!(prefs.min_log_level, LogLevel::Debug);
    }
}
