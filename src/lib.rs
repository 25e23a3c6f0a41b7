pub mod analysis;
pub mod config;
pub mod detection;
pub mod input;
pub mod models;
pub mod news;
pub mod output;

// Re-export commonly used types
pub use analysis::{Analysis, AnalysisError, AnalysisSummary, FrequencyRanker, LogAnalyzer};
pub use config::Config;
pub use detection::{IpReputationList, PatternSet, SuspicionClassifier};
pub use input::{LogFileReader, LogLineParser};
pub use models::{ParsedRequest, RankedEntry, RankedReport, Signal};
pub use news::{KeywordFilter, NewsFeed, NewsWatcher, SeenStore};
pub use output::{OutputFormat, ReportEmitter};
