use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use structopt::StructOpt;

use logscan::config::Config;
use logscan::input::{LogFileReader, LogLineParser};
use logscan::output::{OutputFormat, ReportEmitter};
use logscan::{AnalysisError, LogAnalyzer, SuspicionClassifier};

/// Access log scanner: flags and ranks suspicious requests
#[derive(StructOpt, Debug)]
#[structopt(name = "log_scan", about = "Suspicious request scanner for web access logs")]
pub enum Cli {
    /// Analyze a log file and print the most frequent suspicious requests
    Analyze {
        /// Path to configuration file (defaults are used if it does not exist)
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Log file to analyze, overrides the configured path
        #[structopt(short, long)]
        file: Option<PathBuf>,
        /// Number of entries in the ranking, overrides the configured size
        #[structopt(short, long)]
        top: Option<usize>,
        /// Output format: console, log, json or jsonl
        #[structopt(long)]
        format: Option<String>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
    /// Show how the first lines of a log file parse and classify
    Parse {
        /// Path to configuration file (defaults are used if it does not exist)
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Path to log file
        #[structopt(short, long)]
        file: PathBuf,
        /// Number of lines to show
        #[structopt(short, long, default_value = "10")]
        lines: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    match Cli::from_args() {
        Cli::Analyze { config, file, top, format } => {
            let mut config = load_config(&config)?;
            if let Some(file) = file {
                config.input.file_path = file;
            }
            if let Some(top) = top {
                config.report.top_k = top;
            }
            if let Some(format) = format {
                config.report.format = format;
            }

            let running = Arc::new(AtomicBool::new(true));
            let r = running.clone();
            ctrlc::set_handler(move || {
                log::info!("Received shutdown signal, stopping...");
                r.store(false, Ordering::SeqCst);
            })?;

            let analyzer = LogAnalyzer::from_config(&config)?;
            let report = match analyzer.run(&config.input.file_path, &running) {
                Ok(report) => report,
                Err(AnalysisError::Cancelled) => return Ok(()),
                Err(e) => return Err(e.into()),
            };

            if !running.load(Ordering::SeqCst) {
                return Ok(());
            }

            let mut emitter = ReportEmitter::new(
                OutputFormat::from_str(&config.report.format),
                config.report.file_path.clone(),
            )?;
            emitter.emit(&report)?;
            emitter.flush()?;
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Cli::Parse { config, file, lines } => {
            let config = load_config(&config)?;
            let raw = LogFileReader::new(file).read_lines()?;
            let parser = LogLineParser::new();
            let classifier = SuspicionClassifier::from_config(&config.detection)?;
            let display_count = std::cmp::min(lines, raw.len());

            println!("Read {} line(s) (showing {}):\n", raw.len(), display_count);
            for line in raw.iter().take(display_count) {
                match parser.parse(line) {
                    Some(request) => {
                        let verdict = match classifier.assess(&request) {
                            Some(signal) => format!("SUSPICIOUS ({})", signal),
                            None => "ok".to_string(),
                        };
                        println!(
                            "  IP: {}, Request: {}, Verdict: {}",
                            request.client_ip, request.request_text, verdict
                        );
                    }
                    None => println!("  Skipped: {}", line),
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(Config::from_file(path)?)
    } else {
        log::warn!("Config file {:?} not found, using defaults", path);
        Ok(Config::default())
    }
}
