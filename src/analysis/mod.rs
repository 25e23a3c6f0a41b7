//! Access log analysis pipeline
//!
//! One run reads the whole log, parses and classifies every line, counts
//! suspicious request texts and ranks them:
//! `read -> parse* -> classify* -> accumulate* -> rank`.

pub mod ranker;

pub use ranker::FrequencyRanker;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::detection::SuspicionClassifier;
use crate::input::{InputError, LogFileReader, LogLineParser};
use crate::models::RankedReport;

/// Errors that end an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis cancelled")]
    Cancelled,
}

/// Line counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub total_lines: usize,
    pub parsed: usize,
    /// Lines without a client address or quoted request
    pub skipped: usize,
    pub suspicious: usize,
    /// Distinct suspicious request texts
    pub distinct: usize,
}

/// Result of processing a batch of lines
#[derive(Debug)]
pub struct Analysis {
    pub ranker: FrequencyRanker,
    pub summary: AnalysisSummary,
}

impl Analysis {
    pub fn report(&self, top_k: usize) -> RankedReport {
        RankedReport::new(top_k, self.ranker.rank(top_k))
    }
}

/// Runs the detection pipeline over access logs
pub struct LogAnalyzer {
    parser: LogLineParser,
    classifier: SuspicionClassifier,
    top_k: usize,
}

impl LogAnalyzer {
    pub fn new(classifier: SuspicionClassifier, top_k: usize) -> Self {
        LogAnalyzer {
            parser: LogLineParser::new(),
            classifier,
            top_k,
        }
    }

    /// Build an analyzer from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = SuspicionClassifier::from_config(&config.detection)?;
        Ok(Self::new(classifier, config.report.top_k))
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn classifier(&self) -> &SuspicionClassifier {
        &self.classifier
    }

    /// Parse, classify and count every line, in order
    pub fn analyze_lines<S: AsRef<str>>(&self, lines: &[S]) -> Analysis {
        let mut ranker = FrequencyRanker::new();
        let mut summary = AnalysisSummary {
            total_lines: lines.len(),
            ..AnalysisSummary::default()
        };

        for line in lines {
            let request = match self.parser.parse(line.as_ref()) {
                Some(request) => request,
                None => {
                    summary.skipped += 1;
                    continue;
                }
            };
            summary.parsed += 1;

            if let Some(signal) = self.classifier.assess(&request) {
                log::debug!(
                    "Suspicious request from {} ({}): {}",
                    request.client_ip,
                    signal,
                    request.request_text
                );
                summary.suspicious += 1;
                ranker.accumulate(&request.request_text);
            }
        }

        summary.distinct = ranker.len();
        Analysis { ranker, summary }
    }

    /// Run the whole pipeline over a log file
    ///
    /// `running` is checked between stages; clearing it stops the run with
    /// `AnalysisError::Cancelled` and no report.
    pub fn run(&self, path: &Path, running: &AtomicBool) -> Result<RankedReport, AnalysisError> {
        log::info!("Analyzing log file: {:?}", path);
        let lines = LogFileReader::new(path).read_lines()?;
        Self::check_running(running)?;

        let analysis = self.analyze_lines(&lines);
        Self::check_running(running)?;

        let summary = analysis.summary;
        log::info!(
            "Processed {} line(s): {} parsed, {} skipped, {} suspicious ({} distinct)",
            summary.total_lines,
            summary.parsed,
            summary.skipped,
            summary.suspicious,
            summary.distinct
        );

        Ok(analysis.report(self.top_k))
    }

    fn check_running(running: &AtomicBool) -> Result<(), AnalysisError> {
        if running.load(Ordering::SeqCst) {
            Ok(())
        } else {
            log::info!("Stop requested, abandoning analysis");
            Err(AnalysisError::Cancelled)
        }
    }
}
