use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid expression for pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        source: regex::Error,
    },

    #[error("Duplicate pattern name: {0}")]
    DuplicatePattern(String),

    #[error("Report size must be at least 1")]
    ZeroTopK,
}

/// Configuration for the log scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input source configuration
    pub input: InputConfig,
    /// Detection rules configuration
    pub detection: DetectionConfig,
    /// Report configuration
    pub report: ReportConfig,
    /// Headline watcher configuration
    #[serde(default)]
    pub news: NewsConfig,
}

/// Input source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the access log
    pub file_path: PathBuf,
}

/// Detection rules configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Addresses flagged regardless of request content
    pub blacklist: Vec<String>,
    /// Addresses never flagged by reputation alone
    pub whitelist: Vec<String>,
    /// Named attack signatures, evaluated in order
    pub patterns: Vec<PatternConfig>,
}

/// A single named attack signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    /// Regular expression, matched case-insensitively
    pub expression: String,
}

impl PatternConfig {
    pub fn new(name: &str, expression: &str) -> Self {
        PatternConfig {
            name: name.to_string(),
            expression: expression.to_string(),
        }
    }
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of entries in the ranking
    pub top_k: usize,
    /// Output format: "console", "log", "json" or "jsonl"
    pub format: String,
    /// Output file path (stdout when absent)
    pub file_path: Option<PathBuf>,
}

/// Headline watcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    pub listing_url: String,
    /// Headlines containing any of these (case-insensitive) are followed
    pub keywords: Vec<String>,
    pub poll_interval_seconds: u64,
    /// Total run time before the watcher stops on its own
    pub run_timeout_seconds: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        NewsConfig {
            listing_url: "https://www.rbc.ru/short_news".to_string(),
            keywords: [
                "демократы",
                "республиканцы",
                "партийная политика",
                "предвыборная кампания",
                "голосование",
                "кандидаты",
                "политические дебаты",
                "партийные съезды",
                "политические идеологии",
                "программы партий",
                "законопроекты",
                "политические лидеры",
                "интервью с политиками",
                "партийные платформы",
                "реформы",
                "бюджетные решения",
                "внешняя политика",
                "внутренняя политика",
                "импичмент",
                "политические скандалы",
                "президентские выборы",
                "конгресс",
                "сенат",
                "палата представителей",
                "губернаторы",
                "министры",
                "политические резолюции",
                "партийные лидеры",
                "партийная риторика",
                "партийные соглашения",
                "партийная платформа",
                "партийные стратегии",
                "партийные конвенции",
                "партийные обещания",
                "законодательная инициатива",
                "партийные позиции",
                "партийные встречи",
                "партийные реформы",
                "партийные кампании",
                "партийные события",
                "дебаты",
                "кампании",
                "политика",
                "выборы",
                "лидерство",
                "партийные инициативы",
                "президент",
                "законодательство",
                "оппозиция",
                "политическая арена",
                "выборы в Конгресс",
                "выборы в Сенат",
                "выборы в Палату представителей",
                "решения по бюджету",
                "кампания по привлечению голосов",
                "политические решения",
                "партийные агитации",
                "Трамп",
                "Байден",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            poll_interval_seconds: 60,
            run_timeout_seconds: 4 * 60 * 60,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            blacklist: ["94.23.74.168", "112.94.184.152", "195.101.2.195", "5.135.213.197"]
                .iter()
                .map(|ip| ip.to_string())
                .collect(),
            whitelist: ["8.8.8.8", "0.0.0.0"]
                .iter()
                .map(|ip| ip.to_string())
                .collect(),
            patterns: default_patterns(),
        }
    }
}

/// Built-in attack signatures
pub fn default_patterns() -> Vec<PatternConfig> {
    vec![
        PatternConfig::new(
            "sql_injection",
            r"\bunion\b.*\bselect\b|\bselect\b.*\b(from|where)\b|load_file|outfile|\binto\b.*\bfile\b",
        ),
        PatternConfig::new("path_traversal", r"\.\./|\.\.\\|/etc/|~/|//"),
        PatternConfig::new("xss_attack", r"<\s*script\s*>"),
        PatternConfig::new("csrf_attack", r"csrf_token="),
        PatternConfig::new("command_injection", r";|\|&|\$\(.*?\)|`.*?`|&&|\|\|"),
        PatternConfig::new("shell_metacharacters", r"[|;*?~^<>]"),
        PatternConfig::new("server_side_include", r"<!--#.*?-->"),
        PatternConfig::new(
            "file_inclusion",
            r"/etc/passwd|/etc/shadow|/proc/self/environ|/etc/group",
        ),
        PatternConfig::new("remote_file_inclusion", r"http://|ftp://|file://"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: InputConfig {
                file_path: PathBuf::from("access.log"),
            },
            detection: DetectionConfig::default(),
            report: ReportConfig {
                top_k: 20,
                format: "log".to_string(),
                file_path: None,
            },
            news: NewsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Check the detection and report sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for pattern in &self.detection.patterns {
            if !names.insert(pattern.name.as_str()) {
                return Err(ConfigError::DuplicatePattern(pattern.name.clone()));
            }
            regex::Regex::new(&pattern.expression).map_err(|source| {
                ConfigError::InvalidPattern {
                    name: pattern.name.clone(),
                    source,
                }
            })?;
        }

        if self.report.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }

        Ok(())
    }
}
