use crate::models::RankedReport;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing a report
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text lines to the writer
    Console,
    /// Plain text lines through the `log` facade
    Log,
    Json,
    Jsonl,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "console" => OutputFormat::Console,
            "log" => OutputFormat::Log,
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            _ => OutputFormat::Console, // Default
        }
    }
}

/// Header line of a text report
pub fn header_line(report: &RankedReport) -> String {
    format!("Top-{} suspicious requests:", report.top_k)
}

/// Render a report as text, header first
pub fn format_lines(report: &RankedReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.entries.len() + 1);
    lines.push(header_line(report));
    for entry in &report.entries {
        lines.push(format!("Request: {} - Occurs {} times", entry.request, entry.count));
    }
    lines
}

/// Writes ranked reports to stdout, a file, any writer or the log
pub struct ReportEmitter {
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
}

impl ReportEmitter {
    /// Create an emitter writing to `file_path` (appending) or stdout
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self, OutputError> {
        let writer: Box<dyn Write + Send> = match file_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(Self::with_writer(format, writer))
    }

    /// Create an emitter over an arbitrary writer
    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write + Send>) -> Self {
        ReportEmitter { format, writer }
    }

    /// Write the report
    ///
    /// A failed write leaves the report untouched, so the caller may retry.
    pub fn emit(&mut self, report: &RankedReport) -> Result<(), OutputError> {
        match &self.format {
            OutputFormat::Console => {
                let mut output = format_lines(report).join("\n");
                output.push('\n');
                self.write_output(&output)?;
            }
            OutputFormat::Log => {
                for line in format_lines(report) {
                    log::info!("{}", line);
                }
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)?;
                self.write_output(&format!("{}\n", json))?;
            }
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(report)?;
                self.write_output(&format!("{}\n", json))?;
            }
        }
        Ok(())
    }

    fn write_output(&mut self, data: &str) -> Result<(), OutputError> {
        self.writer.write_all(data.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}
