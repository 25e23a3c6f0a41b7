//! Named attack signatures
//!
//! Each signature approximates one attack class (SQL injection, path
//! traversal, XSS, ...) and is matched case-insensitively against the
//! request line.

use crate::config::{ConfigError, PatternConfig};
use regex::{Regex, RegexBuilder};

/// A compiled attack signature
#[derive(Debug, Clone)]
pub struct AttackPattern {
    name: String,
    regex: Regex,
}

impl AttackPattern {
    pub fn new(name: &str, expression: &str) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(expression)
            .case_insensitive(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                name: name.to_string(),
                source,
            })?;

        Ok(AttackPattern {
            name: name.to_string(),
            regex,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered set of uniquely named attack signatures
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<AttackPattern>,
}

impl PatternSet {
    /// Compile signatures from configuration, keeping their order
    pub fn from_config(configs: &[PatternConfig]) -> Result<Self, ConfigError> {
        let mut patterns: Vec<AttackPattern> = Vec::with_capacity(configs.len());

        for config in configs {
            if patterns.iter().any(|p| p.name == config.name) {
                return Err(ConfigError::DuplicatePattern(config.name.clone()));
            }
            patterns.push(AttackPattern::new(&config.name, &config.expression)?);
        }

        Ok(PatternSet { patterns })
    }

    /// The built-in signatures
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::from_config(&crate::config::default_patterns())
    }

    /// True if any signature matches
    pub fn matches_any(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    /// Name of the first signature (in configured order) that matches
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.is_match(text))
            .map(|p| p.name())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
