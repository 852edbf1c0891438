//! Encryption detection CLI
//!
//! Analyzes one or more files and prints, for each, the chi-square
//! statistic, the Monte Carlo pi estimate and its error, and a confidence
//! percentage that the file is encrypted.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, ValueEnum};
use encdetect::{
    ingest::{FileConfig, InputSource, OutputFormat},
    metrics::MetricsRegistry,
    report::BatchDocument,
    AnalysisError, AnalysisReport, Detector,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "encdetect")]
#[command(about = "Estimate whether files are encrypted using chi-square and Monte Carlo pi")]
#[command(version = encdetect::VERSION)]
struct Cli {
    /// Files to analyze; `-` reads standard input
    inputs: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Report format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Print all 256 byte counters after each report
    #[arg(long)]
    histogram: bool,

    /// Analyze up to N inputs in parallel
    #[arg(long, short, default_value_t = 1)]
    jobs: usize,

    /// Write Prometheus text-format metrics to this file
    #[arg(long)]
    metrics_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Toml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Toml => OutputFormat::Toml,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.inputs.is_empty() {
        // Nothing to do is not an error.
        if let Err(e) = Cli::command().print_help() {
            warn!("Failed to print usage: {}", e);
        }
        return ExitCode::SUCCESS;
    }

    let mut config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Invalid configuration {}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if cli.histogram {
        config.output.show_histogram = true;
    }
    if cli.metrics_file.is_some() {
        config.output.metrics_file = cli.metrics_file.clone();
    }

    let detector = match Detector::from_config(&config) {
        Ok(detector) => detector,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    let cancel = detector.cancel_token();
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    info!("encdetect v{}", encdetect::VERSION);

    let sources: Vec<InputSource> = cli.inputs.into_iter().map(InputSource::from).collect();
    let results = detector.analyze_all(&sources, cli.jobs);

    if let Err(e) = print_results(&results, &config) {
        error!("Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }

    if let Some(path) = &config.output.metrics_file {
        if let Err(e) = write_metrics(&results, path) {
            error!("Failed to write metrics to {}: {}", path.display(), e);
        }
    }

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        "Analyzed {} inputs: {} ok, {} failed",
        results.len(),
        results.len() - failed,
        failed
    );

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn print_results(
    results: &[Result<AnalysisReport, AnalysisError>],
    config: &FileConfig,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.output.format {
        OutputFormat::Toml => {
            let doc = BatchDocument::from_results(results)
                .to_toml()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            out.write_all(doc.as_bytes())?;
        }
        OutputFormat::Text => {
            let mut printed = false;
            for result in results {
                match result {
                    Ok(report) => {
                        if printed {
                            writeln!(out)?;
                        }
                        printed = true;
                        writeln!(out, "{report}")?;
                        if config.output.show_histogram {
                            report.write_histogram(&mut out)?;
                        }
                    }
                    Err(err) => {
                        eprintln!("Error: {err}");
                        if let Some(chi) = err.partial_chi_square() {
                            if printed {
                                writeln!(out)?;
                            }
                            printed = true;
                            writeln!(out, "File: {}", err.input())?;
                            writeln!(out, "Chi-Square Distribution: {chi:.4}")?;
                            writeln!(out, "Monte Carlo Pi Value: n/a (input too short)")?;
                        }
                    }
                }
            }
        }
    }

    out.flush()
}

fn write_metrics(
    results: &[Result<AnalysisReport, AnalysisError>],
    path: &std::path::Path,
) -> Result<(), encdetect::metrics::MetricsError> {
    let registry = MetricsRegistry::new()?;
    registry.record_all(results);
    registry.write_to(path)
}
